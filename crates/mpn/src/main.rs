use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod batches;
mod fetch;
mod input;

#[derive(Parser)]
#[command(name = "mpn")]
#[command(about = "Look up manufacturer part numbers in the Mouser catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch part data for every MPN in a CSV file
    #[command(alias = "f")]
    Fetch(fetch::FetchArgs),

    /// Show the request batches a fetch would send
    #[command(alias = "b")]
    Batches(batches::BatchesArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug; RUST_LOG overrides both
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Fetch(args) => fetch::execute(args),
        Commands::Batches(args) => batches::execute(args),
    }
}
