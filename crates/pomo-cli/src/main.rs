use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod common;
mod settings;

#[derive(Parser)]
#[command(name = "pomo", version, about = "Pomodoro interval timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive work/break intervals in real time
    Run(commands::run::RunArgs),
    /// Pause the currently running interval
    Pause,
    /// Show the most recent interval
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List stored intervals, newest first
    History {
        /// Maximum number of records to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Pause => commands::pause::run(),
        Commands::Status { json } => commands::status::run(json),
        Commands::History { limit } => commands::history::run(limit),
        Commands::Config => commands::config::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
