use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "devtab", version, about = "DevTab dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Quick-link icon resolution
    Icon {
        #[command(subcommand)]
        action: commands::icon::IconAction,
    },
    /// Print where a search query navigates
    Search(commands::search::SearchArgs),
    /// Print the dashboard clock
    Clock(commands::clock::ClockArgs),
    /// GitHub contribution graph
    Github {
        #[command(subcommand)]
        action: commands::github::GithubAction,
    },
    /// Quick link management
    Links {
        #[command(subcommand)]
        action: commands::links::LinksAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DEVTAB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Icon { action } => commands::icon::run(action),
        Commands::Search(args) => commands::search::run(args),
        Commands::Clock(args) => commands::clock::run(args),
        Commands::Github { action } => commands::github::run(action),
        Commands::Links { action } => commands::links::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
