use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "stillroom-cli", version, about = "Stillroom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Visual phase clock simulation
    Phase {
        #[command(subcommand)]
        action: commands::phase::PhaseAction,
    },
    /// Breath pattern progression
    Breath {
        #[command(subcommand)]
        action: commands::breath::BreathAction,
    },
    /// Tempo-synced session simulation
    Tempo {
        #[command(subcommand)]
        action: commands::tempo::TempoAction,
    },
    /// Beat-grid quantization
    Quantize(commands::quantize::QuantizeArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Phase { action } => commands::phase::run(action),
        Commands::Breath { action } => commands::breath::run(action),
        Commands::Tempo { action } => commands::tempo::run(action),
        Commands::Quantize(args) => commands::quantize::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
