use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hansard_parse::{HansardParser, RawPayload, Session};
use hansard_sync::{
    DEFAULT_BASE_URL, FetchedSitting, HansardClient, format_sitting_date, parse_sitting_date,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod display;

#[derive(Parser)]
#[command(name = "hansard", version)]
#[command(about = "Parse and fetch Hansard sitting transcripts", long_about = None)]
struct Cli {
    /// Parser configuration (TOML); built-in tables when omitted
    #[arg(long, global = true, env = "HANSARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a saved report payload and print the session as JSON
    Parse {
        /// Report payload as returned by the service
        payload: PathBuf,
        /// Sitting date (DD-MM-YYYY)
        #[arg(long)]
        date: String,
    },
    /// Fetch and parse one sitting date, or an inclusive range
    Fetch {
        /// First sitting date (DD-MM-YYYY)
        date: String,
        /// Last sitting date (DD-MM-YYYY), inclusive
        #[arg(long)]
        to: Option<String>,
        /// Print each session as JSON instead of a summary
        #[arg(long)]
        json: bool,
        /// Report service base URL
        #[arg(long, env = "HANSARD_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        /// Milliseconds to wait between requests of a range
        #[arg(long, default_value = "500")]
        delay_ms: u64,
    },
}

fn load_parser(config: Option<&Path>) -> Result<HansardParser> {
    let parser = match config {
        Some(path) => HansardParser::from_config_path(path)
            .with_context(|| format!("loading parser config {}", path.display()))?,
        None => HansardParser::with_defaults()?,
    };
    Ok(parser)
}

fn print_session(session: &Session, json: bool) -> Result<()> {
    if json {
        println!("{}", session.to_json()?);
    } else {
        print!("{}", display::render(session));
    }
    Ok(())
}

fn parse_file(parser: &HansardParser, path: &Path, date: &str) -> Result<()> {
    let Some(date) = hansard_parse::metadata::normalize_date(date) else {
        bail!("invalid sitting date {date:?}, expected DD-MM-YYYY");
    };
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("reading payload {}", path.display()))?;
    let payload: RawPayload = serde_json::from_str(&body)
        .with_context(|| format!("decoding payload {}", path.display()))?;
    let session = parser.parse(&date, &payload)?;
    print_session(&session, true)
}

async fn fetch(
    parser: &HansardParser,
    client: &HansardClient,
    start: &str,
    end: Option<&str>,
    json: bool,
) -> Result<()> {
    let sittings = match end {
        Some(end) => client.fetch_range(start, end).await?,
        None => match client.fetch_by_date(start).await? {
            Some(payload) => vec![FetchedSitting {
                date: format_sitting_date(parse_sitting_date(start)?),
                payload,
            }],
            None => Vec::new(),
        },
    };

    if sittings.is_empty() {
        info!(start, "no sittings found");
    }
    for sitting in &sittings {
        let session = parser
            .parse(&sitting.date, &sitting.payload)
            .with_context(|| format!("parsing sitting {}", sitting.date))?;
        print_session(&session, json)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("hansard v{}", env!("CARGO_PKG_VERSION"));
    let parser = load_parser(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { payload, date } => parse_file(&parser, &payload, &date)?,
        Commands::Fetch {
            date,
            to,
            json,
            base_url,
            delay_ms,
        } => {
            let client =
                HansardClient::new(base_url).with_request_delay(Duration::from_millis(delay_ms));
            fetch(&parser, &client, &date, to.as_deref(), json).await?;
        }
    }

    Ok(())
}
