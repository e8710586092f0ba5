use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::distance::DistanceArgs;

mod distance;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Query travel distance and duration for origin/destination pairs
    #[command(visible_alias = "d")]
    Distance {
        #[command(flatten)]
        args: DistanceArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Distance { args }) => distance::run(args).await?,
        None => {
            // Handle no command provided
        }
    }

    Ok(())
}
