use anyhow::Context;
use backend::ai::MoveOrchestrator;
use backend::config::ServiceConfig;
use chess_engine::{Difficulty, Side};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "royalmint-chess", version, about = "Chess AI move service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP move service
    Serve {
        /// Listen address, overriding CHESS_BIND_ADDR
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Resolve a single move and print it
    Resolve {
        #[arg(long)]
        fen: String,
        #[arg(long, default_value = "white")]
        side: Side,
        #[arg(long, default_value = "hard")]
        difficulty: Difficulty,
        /// Seed for reproducible book, search and fallback choices
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    backend::init_tracing();

    let cli = Cli::parse();
    let mut config = ServiceConfig::from_env().context("Invalid configuration")?;

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            backend::serve(config).await
        }
        Command::Resolve {
            fen,
            side,
            difficulty,
            seed,
        } => {
            let mut orchestrator = MoveOrchestrator::from_config(&config);
            if let Some(seed) = seed {
                orchestrator = orchestrator.with_seed(seed);
            }
            let resolved = orchestrator.resolve_move(&fen, side, difficulty).await?;
            println!(
                "{} ({}) via {}",
                resolved.san,
                resolved.uci,
                resolved.source.as_str()
            );
            println!("{}", resolved.fen_after);
            Ok(())
        }
    }
}
