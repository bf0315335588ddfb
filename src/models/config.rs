use crate::assets::AssetLoader;
use serde::Deserialize;
use vision_sim::{FilterKind, FilterSpec, Magnifier, MagnifierState, ZoomState};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Initial filter selection
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Magnifier lens settings
    #[serde(default)]
    pub lens: LensConfig,

    /// Upload limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Preview cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// PNG output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Selection applied after every upload
#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    /// Filter tag ("none", "blur", ...)
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Strength on the 0-100 slider scale
    #[serde(default = "default_intensity")]
    pub intensity: f32,

    /// Lens magnification
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_filter() -> String {
    "none".to_string()
}

fn default_intensity() -> f32 {
    vision_sim::DEFAULT_INTENSITY_PERCENT as f32
}

fn default_zoom() -> f64 {
    vision_sim::magnifier::DEFAULT_ZOOM
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            intensity: default_intensity(),
            zoom: default_zoom(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LensConfig {
    /// Lens diameter in display pixels
    #[serde(default = "default_diameter")]
    pub diameter: f64,
}

fn default_diameter() -> f64 {
    vision_sim::magnifier::DEFAULT_LENS_DIAMETER
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            diameter: default_diameter(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    /// Largest accepted request body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Largest decoded image (width * height)
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_max_pixels() -> u64 {
    40_000_000
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            max_pixels: default_max_pixels(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Number of encoded previews kept in memory (0 disables caching)
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    64
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    /// Losslessly re-compress PNG output with oxipng
    #[serde(default)]
    pub optimize: bool,
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse YAML, falling back to defaults on error
    pub fn parse(content: &str) -> Self {
        match serde_yaml::from_str::<Self>(content) {
            Ok(config) => {
                tracing::info!(
                    filter = %config.defaults.filter,
                    intensity = config.defaults.intensity,
                    cache_capacity = config.cache.capacity,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }

    /// Default filter kind; an unknown tag in the config falls back to none
    pub fn default_kind(&self) -> FilterKind {
        self.defaults.filter.parse().unwrap_or_else(|e| {
            tracing::warn!(%e, "Invalid default filter in config, using none");
            FilterKind::None
        })
    }

    /// Default filter selection
    pub fn default_spec(&self) -> FilterSpec {
        FilterSpec::from_percent(self.default_kind(), self.defaults.intensity)
    }

    /// Inactive magnifier with the configured zoom and lens size
    pub fn magnifier(&self) -> Magnifier {
        Magnifier::new(MagnifierState::Inactive, ZoomState::new(self.defaults.zoom))
            .with_diameter(self.lens.diameter)
    }
}
