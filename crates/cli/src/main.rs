use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "sitelens", about = "Sitelens — page style and technology analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,
    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,
    /// Path to a config file (overrides discovery).
    #[arg(long, global = true, env = "SITELENS_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the analysis server (default when no subcommand is provided).
    Serve,
    /// Analyze a single URL and print the result as JSON.
    Analyze {
        /// Absolute http/https URL to analyze.
        url: String,
    },
    /// Check that a usable browser binary can be found.
    Doctor,
}

/// Initialise tracing from CLI flags and `RUST_LOG`.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<sitelens_config::SitelensConfig> {
    match &cli.config {
        Some(path) => sitelens_config::load_config(path),
        None => Ok(sitelens_config::discover_and_load()),
    }
}

async fn run_analyze(config: &sitelens_config::SitelensConfig, url: &str) -> anyhow::Result<()> {
    let url = sitelens_common::validate_analysis_url(url)?;

    let analyzer = sitelens_analyzer::Analyzer::new(config);
    let result = analyzer
        .analyze(&url)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_doctor(config: &sitelens_config::SitelensConfig) {
    let detection = sitelens_browser::detect::detect_browser(config.browser.chrome_path.as_deref());
    match detection.path {
        Some(path) => println!("browser found: {}", path.display()),
        None => {
            eprintln!("{}", detection.install_hint);
            std::process::exit(1);
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    let mut config = load_config(&cli)?;

    match cli.command {
        // Default: start the server when no subcommand is provided.
        None | Some(Commands::Serve) => {
            info!(version = env!("CARGO_PKG_VERSION"), "sitelens starting");

            // CLI args override config values.
            if let Some(bind) = cli.bind {
                config.server.bind = bind;
            }
            if let Some(port) = cli.port {
                config.server.port = port;
            }

            sitelens_gateway::start_server(config).await
        },
        Some(Commands::Analyze { url }) => run_analyze(&config, &url).await,
        Some(Commands::Doctor) => {
            run_doctor(&config);
            Ok(())
        },
    }
}
