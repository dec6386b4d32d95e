use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "waqt", version, about = "Daily prayer times in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show prayer times for a day
    Times(commands::times::TimesArgs),
    /// Show the upcoming prayer and a countdown
    Next(commands::next::NextArgs),
    /// Fetch a fresh schedule when the location gate requires it
    Refresh(commands::refresh::RefreshArgs),
    /// Location management
    Location {
        #[command(subcommand)]
        action: commands::location::LocationAction,
    },
    /// Cached schedule management
    Cache {
        #[command(subcommand)]
        action: commands::cache::CacheAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Times(args) => commands::times::run(args),
        Commands::Next(args) => commands::next::run(args),
        Commands::Refresh(args) => commands::refresh::run(args),
        Commands::Location { action } => commands::location::run(action),
        Commands::Cache { action } => commands::cache::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
