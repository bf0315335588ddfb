use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use vision_sim::{FilterKind, FilterSpec};

use visionlens::api;
use visionlens::assets::{AssetLoader, ConfigSource};
use visionlens::models::AppConfig;
use visionlens::rendering::PngCodec;
use visionlens::server;
use visionlens::services::render_blocking;

#[derive(Parser)]
#[command(name = "visionlens")]
#[command(about = "VisionLens - preview images through simulated vision conditions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply a vision filter to an image file
    Render {
        /// Input image path (PNG, JPEG or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Filter tag (see `visionlens filters`); defaults to the configured filter
        #[arg(short, long)]
        filter: Option<String>,

        /// Strength on the 0-100 scale; defaults to the configured intensity
        #[arg(short = 'n', long)]
        intensity: Option<f32>,
    },
    /// List available filters
    Filters,
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VisionLens API",
        description = "Preview images through simulated vision conditions, with a magnifying lens",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_filters,
        api::handle_preview,
        api::handle_magnifier,
    ),
    components(schemas(
        api::FilterInfo,
        api::FiltersResponse,
        api::SelectionDefaults,
        api::PreviewFormat,
        api::PreviewJsonResponse,
        api::ErrorResponse,
        api::MagnifierRequest,
        api::MagnifierEvent,
        api::MagnifierStateDto,
        api::MagnifierResponse,
        api::BoundsDto,
        api::LensDto,
        api::PercentPoint,
        api::PixelPoint,
    )),
    tags(
        (name = "Filters", description = "Available vision conditions"),
        (name = "Preview", description = "Filtered image previews"),
        (name = "Magnifier", description = "Magnifying lens geometry")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            filter,
            intensity,
        }) => run_render_command(&input, &output, filter.as_deref(), intensity),
        Some(Commands::Filters) => {
            run_filters_command();
            Ok(())
        }
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visionlens=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Filter an image file directly (no server needed)
fn run_render_command(
    input: &Path,
    output: &Path,
    filter: Option<&str>,
    intensity: Option<f32>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);

    let kind = match filter {
        Some(tag) => tag.parse::<FilterKind>()?,
        None => config.default_kind(),
    };
    let spec = FilterSpec::from_percent(kind, intensity.unwrap_or(config.defaults.intensity));

    let source = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let codec = PngCodec::new(config.limits.max_pixels, config.output.optimize);
    let png_bytes = render_blocking(&codec, &source, spec)?;

    std::fs::write(output, &png_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output.display()))?;

    println!(
        "Rendered {} ({}, {:.0}%) to {} ({} bytes)",
        input.display(),
        kind.label(),
        spec.intensity() * 100.0,
        output.display(),
        png_bytes.len()
    );

    Ok(())
}

/// Print the filter table
fn run_filters_command() {
    println!("Available filters:");
    for kind in FilterKind::ALL {
        println!("  {:<14} {}", kind.as_str(), kind.label());
    }
}

/// Extract the embedded config.yaml
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let loader = AssetLoader::from_env();
    let report = loader.init(force)?;

    for f in &report.written {
        println!("Extracted {f}");
    }
    for f in &report.skipped {
        println!("Skipped existing {f} (use --force to overwrite)");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("VisionLens v{VERSION}");
    println!("Preview images through simulated vision conditions\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::new(config_file.clone().map(PathBuf::from));
    let config_source = match (loader.config_source(), config_file) {
        (ConfigSource::File(path), _) => path.display().to_string(),
        (ConfigSource::Embedded, Some(_)) => "embedded (file not found)".to_string(),
        (ConfigSource::Embedded, None) => "embedded".to_string(),
    };
    println!("\nConfig:  {config_source}");

    println!("\nCommands:");
    println!("  visionlens serve     Start the HTTP server");
    println!("  visionlens render    Apply a filter to an image file");
    println!("  visionlens filters   List available filters");
    println!("  visionlens init      Extract embedded config.yaml");
    println!("\nRun 'visionlens --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visionlens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(config = ?asset_loader.config_source(), "Config source");

    // Seed CONFIG_FILE if it is set but missing
    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config");
    }

    let state = server::create_app_state(asset_loader)?;

    // OpenAPI documentation (production only)
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "VisionLens server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
