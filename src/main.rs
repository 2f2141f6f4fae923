//! Binary entrypoint for the lexibot CLI.
//!
//! Commands:
//! - `start [--user <name>] [--channel <name>]` - run the bot against the console transport
//! - `init` - write a starter `lexibot.toml` and create the data directory
//! - `status` - print configuration and store summary
//!
//! See the library crate docs for module-level details: `lexibot::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::sync::mpsc;

use lexibot::bot::transport::spawn_console;
use lexibot::bot::BotServer;
use lexibot::config::Config;

#[derive(Parser)]
#[command(name = "lexibot")]
#[command(about = "A vocabulary mini-game chat bot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "lexibot.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console transport
    Start {
        /// Author for lines without an `@user` prefix
        #[arg(short, long, default_value = "console")]
        user: String,

        /// Channel for lines without a `#channel` prefix
        #[arg(long, default_value = "general")]
        channel: String,
    },
    /// Write a default configuration file
    Init,
    /// Show configuration and vocabulary statistics
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Start { user, channel } => {
            // Only a missing file falls back to defaults; a broken one is fatal.
            let config = match pre_config {
                Some(c) => c,
                None => Config::load_or_default(&cli.config).await?,
            };
            info!("Starting lexibot v{}", env!("CARGO_PKG_VERSION"));
            if config.token().is_none() {
                info!(
                    "No platform token in ${}; running on the console transport",
                    config.bot.token_env
                );
            }

            let (out_tx, out_rx) = mpsc::unbounded_channel();
            let (in_tx, in_rx) = mpsc::unbounded_channel();
            let server = BotServer::new(config, out_tx);
            let (_reader, writer) = spawn_console(user, channel, in_tx, out_rx);

            server.run(in_rx).await?;
            drop(server);
            // Games still waiting hold senders; give the writer a moment, not forever.
            let _ = tokio::time::timeout(std::time::Duration::from_secs(1), writer).await;
        }
        Commands::Init => {
            info!("Initializing new lexibot configuration");
            if std::path::Path::new(&cli.config).exists() {
                warn!("{} already exists; leaving it untouched", cli.config);
            } else {
                Config::create_default(&cli.config).await?;
                info!("Wrote default configuration to {}", cli.config);
            }
            let config = Config::load(&cli.config).await?;
            tokio::fs::create_dir_all(&config.storage.data_dir).await?;
            info!("Data directory ready at {}", config.storage.data_dir);
            println!("lexibot initialized. Edit {} and run `lexibot start`.", cli.config);
        }
        Commands::Status => {
            let config = Config::load(&cli.config).await?;
            let (out_tx, _out_rx) = mpsc::unbounded_channel();
            let server = BotServer::new(config, out_tx);
            server.show_status()?;
        }
    }

    Ok(())
}

/// Configure env_logger: CLI verbosity wins over the configured level; with a log
/// file, lines go to the file and, in the foreground, also to the console.
fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse::<log::LevelFilter>().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    match log_file {
        Some(f) => {
            let file = std::sync::Mutex::new(f);
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
            });
        }
    }
    let _ = builder.try_init();
}
