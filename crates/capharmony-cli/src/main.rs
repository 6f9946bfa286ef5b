use capharmony::{
    commands::{
        config::{self, ConfigAction},
        plugins, project,
    },
    errors::HarmonyError,
    logger, GlobalOpts,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "capharmony")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Harmony native project tooling",
    long_about = "capharmony scaffolds and updates the Harmony (HarmonyOS) native project of a Capacitor app."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the Harmony native project from the platform template
    Add,
    /// Merge installed plugins, runtime library and web assets into the native project
    Update,
    /// Write the app id and app name into the native project
    Identity,
    /// List installed plugins that support Harmony
    Plugins,
    /// Configure capharmony
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Install the global `tracing` subscriber; fails if one is already set
fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = logger::verbosity_to_filter();
        EnvFilter::new(format!(
            "capharmony={level},capharmony_config={level},capharmony_manifest={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init()
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.no_stdout)
    {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if !cli.global.no_stdout {
        if let Err(e) = init_tracing() {
            logger::debug(&format!("Tracing subscriber not installed: {}", e));
        }
    }

    let result: Result<(), HarmonyError> = match cli.command {
        Commands::Add => project::handle_add(&cli.global),
        Commands::Update => project::handle_update(&cli.global),
        Commands::Identity => project::handle_identity(&cli.global),
        Commands::Plugins => plugins::list_plugins(&cli.global),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&e.to_string());
        if cli.global.verbosity_level() > 0 {
            logger::show_log_path();
        }
        std::process::exit(1);
    }
}
