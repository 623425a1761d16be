use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hookrelay")]
#[command(about = "GitHub issue webhook to Slack relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a default config file.
    Init {
        /// Config file path (default: HOOKRELAY_CONFIG_PATH or ~/.hookrelay/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Run the webhook gateway (GET / health, POST /webhook relay) until Ctrl+C or SIGTERM.
    Serve {
        /// Config file path (default: HOOKRELAY_CONFIG_PATH or ~/.hookrelay/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// HTTP port (default from config or 15152)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Relay a single webhook payload and print the result (Slack's reply or "Error: ...").
    Invoke {
        /// Config file path (default: HOOKRELAY_CONFIG_PATH or ~/.hookrelay/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// File containing the webhook JSON. Reads stdin when omitted.
        #[arg(long, value_name = "FILE")]
        payload: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("hookrelay {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve { config, port }) => {
            if let Err(e) = run_serve(config, port).await {
                log::error!("gateway failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Invoke { config, payload }) => match run_invoke(config, payload).await {
            Ok(result) => println!("{}", result),
            Err(e) => {
                log::error!("invoke failed: {:#}", e);
                std::process::exit(1);
            }
        },
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn run_init(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(lib::config::default_config_path);
    let dir = lib::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

async fn run_serve(config_path: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let (mut config, path) = lib::config::load_config(config_path)?;
    log::debug!("loaded config from {}", path.display());
    if let Some(p) = port {
        config.gateway.port = p;
    }
    log::info!("starting gateway on {}:{}", config.gateway.bind, config.gateway.port);
    lib::gateway::run_gateway(config).await
}

/// One invocation. Relay failures are part of the returned string, not an error:
/// only an unreadable payload or config fails (exit 1).
async fn run_invoke(config_path: Option<PathBuf>, payload_path: Option<PathBuf>) -> anyhow::Result<String> {
    let (config, _) = lib::config::load_config(config_path)?;
    let payload = read_payload(payload_path.as_deref(), std::io::stdin())?;

    let handler = lib::WebhookRelayHandler::from_config(&config.relay)?;
    let ctx = lib::InvocationContext::new("cli");
    Ok(handler.handle(&payload, &ctx).await)
}

/// Raw payload bytes from `path`, or from `stdin` when no path is given.
fn read_payload(path: Option<&Path>, mut stdin: impl Read) -> anyhow::Result<Vec<u8>> {
    use anyhow::Context;

    match path {
        Some(p) => std::fs::read(p).with_context(|| format!("reading payload from {}", p.display())),
        None => {
            let mut buf = Vec::new();
            stdin
                .read_to_end(&mut buf)
                .context("reading payload from stdin")?;
            Ok(buf)
        }
    }
}
