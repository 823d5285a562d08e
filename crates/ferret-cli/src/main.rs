use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ferret_client::ReqwestClient;
use ferret_core::{Analyser, AppError, Fetcher, PageFetcher};

#[derive(Parser)]
#[command(name = "ferret", version, about = "Web page structure and link health analyser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page and print its analysis as JSON
    Analyse {
        /// Target URL to analyse
        #[arg(short, long)]
        url: String,

        /// Request timeout in seconds, for the page and for every link probe
        #[arg(short, long, env = "FERRET_HTTP_TIMEOUT_SECS", default_value_t = 30)]
        timeout: u64,

        /// Refuse to contact private or reserved addresses
        #[arg(long, env = "FERRET_BLOCK_PRIVATE_URLS", default_value_t = false)]
        block_private_urls: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ferret=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyse {
            url,
            timeout,
            block_private_urls,
        } => cmd_analyse(&url, timeout, block_private_urls).await?,
    }

    Ok(())
}

async fn cmd_analyse(url: &str, timeout_secs: u64, block_private_urls: bool) -> Result<()> {
    if timeout_secs == 0 {
        anyhow::bail!("--timeout must be at least 1 second");
    }

    let client = ReqwestClient::with_timeout(Duration::from_secs(timeout_secs))
        .context("Failed to create HTTP client")?
        .block_private_urls(block_private_urls);

    tracing::info!(%url, "Fetching");
    let page = PageFetcher::new(client.clone()).fetch(url).await?;
    if page.content.is_none() {
        return Err(AppError::NoContent {
            status: page.status_text,
        }
        .into());
    }

    let analysis = Analyser::new(client).analyse(&page).await?;

    println!("{}", serde_json::to_string_pretty(&analysis)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyse_parses_flags() {
        let cli = Cli::try_parse_from([
            "ferret",
            "analyse",
            "--url",
            "https://www.rust-lang.org",
            "--timeout",
            "5",
            "--block-private-urls",
        ])
        .unwrap();

        let Commands::Analyse {
            url,
            timeout,
            block_private_urls,
        } = cli.command;
        assert_eq!(url, "https://www.rust-lang.org");
        assert_eq!(timeout, 5);
        assert!(block_private_urls);
    }

    #[test]
    fn analyse_requires_url() {
        assert!(Cli::try_parse_from(["ferret", "analyse"]).is_err());
    }
}
