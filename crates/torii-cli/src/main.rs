//! Torii CLI - runs the chat-completion gateway.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use torii_gateway::{GatewayConfig, start};

#[derive(Parser)]
#[command(name = "torii")]
#[command(about = "Torii - admission-control gateway for chat completions")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "TORII_PORT")]
        port: Option<u16>,

        /// Bind address
        #[arg(long, env = "TORII_BIND")]
        bind: Option<String>,

        /// Admitted requests per client per day
        #[arg(long)]
        daily_limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve {
            port,
            bind,
            daily_limit,
        } => {
            let mut config = GatewayConfig::default();
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            if let Some(limit) = daily_limit {
                config.daily_limit = limit;
            }

            start(config).await?;
        }
    }

    Ok(())
}
