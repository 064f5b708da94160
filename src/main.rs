use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use formbuilder::backend;
use formbuilder::form::FormId;
use formbuilder::gateway::config::{BackendConfig, ConfigError, GatewayConfig};
use formbuilder::gateway::http::HttpGateway;
use formbuilder::gateway::{FormGateway, GatewayError};
use formbuilder::preview::Preview;
use formbuilder::repl;
use formbuilder::session::BuilderSession;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration comes from the environment (and `.env`):
/// `FORM_API_TOKEN`, `FORM_API_BASE_URL`, `FORM_API_REQUEST_TIMEOUT_SECS`,
/// `FORM_API_CONNECT_TIMEOUT_SECS`, `FORM_BACKEND_PORT`.
#[derive(Parser, Debug)]
#[command(name = "formbuilder", about = "Build form definitions and store them on a form service")]
struct Cli {
    /// Form service URL; overrides `FORM_API_BASE_URL`.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the in-memory form service.
    Serve {
        #[arg(long, env = "FORM_BACKEND_PORT")]
        port: Option<u16>,
    },
    /// List saved forms.
    History,
    /// Load a saved form and print its preview.
    Show { id: String },
    /// Interactive builder session on stdin.
    Edit,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing::subscriber::set_global_default(log_subscriber()).map_err(|e| std::io::Error::other(e.to_string()))?;

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "could not read .env");
        }
    }

    let cli = Cli::parse();
    let base_url = cli.base_url;
    match cli.command {
        Command::Serve { port } => run_serve(port).await,
        Command::History => run_history(gateway(base_url)?).await,
        Command::Show { id } => run_show(gateway(base_url)?, FormId::new(id)).await,
        Command::Edit => run_edit(gateway(base_url)?).await,
    }
}

/// Logs go to stderr; stdout belongs to command output and the `edit` loop.
fn log_subscriber() -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt().with_writer(std::io::stderr).finish()
}

fn gateway(base_url: Option<String>) -> Result<HttpGateway, CliError> {
    let mut config = GatewayConfig::from_env()?;
    if let Some(url) = base_url {
        config = GatewayConfig::new(url, config.api_token).with_timeouts(config.timeouts);
    }
    tracing::info!(base_url = %config.base_url, "using form service");
    Ok(HttpGateway::new(&config)?)
}

async fn run_serve(port: Option<u16>) -> Result<(), CliError> {
    let mut config = BackendConfig::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }
    backend::serve(&config).await?;
    Ok(())
}

async fn run_history(gateway: HttpGateway) -> Result<(), CliError> {
    let entries = gateway.list_history().await?;
    if entries.is_empty() {
        println!("no saved forms");
    }
    for entry in entries {
        println!("{:>6}  {}  {}", entry.id, entry.updated_at, entry.title);
    }
    Ok(())
}

async fn run_show(gateway: HttpGateway, id: FormId) -> Result<(), CliError> {
    let document = gateway.load_by_id(&id).await?;
    print!("{}", Preview::of(&document));
    Ok(())
}

async fn run_edit(gateway: HttpGateway) -> Result<(), CliError> {
    let mut session = BuilderSession::new();
    println!("{}", repl::HELP);
    repl::run(&mut session, &gateway, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
