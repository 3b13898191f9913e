use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod cues;

#[derive(Parser)]
#[command(name = "circuit-timer", version, about = "Workout interval timer")]
struct Cli {
    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workout in the terminal
    Run(commands::run::RunArgs),
    /// Play a workout through instantly and report what happened
    Simulate(commands::simulate::SimulateArgs),
    /// Show the workout the current settings produce
    Plan {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Exercise catalog management
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Plan { json } => commands::plan::run(json),
        Commands::Settings { action } => commands::settings::run(action).await,
        Commands::Exercise { action } => commands::exercise::run(action).await,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "circuit-timer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
