use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "vitaharmony", version, about = "VitaHarmony fitness and meditation companion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run first-time setup
    Onboard(commands::onboard::OnboardArgs),
    /// Profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// App settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Browse workouts and meditation sessions
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Play a workout or meditation session
    Play {
        #[command(subcommand)]
        action: commands::play::PlayAction,
    },
    /// Workout and meditation statistics
    Stats,
    /// Current activity streak
    Streak,
    /// Run the remote gate check
    Gate {
        /// Check this URL instead of the configured one
        #[arg(long)]
        url: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("VITAHARMONY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Onboard(args) => commands::onboard::run(args),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Play { action } => commands::play::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Streak => commands::stats::run_streak(),
        Commands::Gate { url } => commands::gate::run(url),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
