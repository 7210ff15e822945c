use anyhow::{bail, Context, Result};
use ads_classic::config::{find_config_file, load_config, Config};
use ads_classic::context::RunContext;
use ads_classic::models::{SearchQuery, SortMode};
use ads_classic::render::{escape_html, render_abstract, render_table, title_text, PageAssembler};
use ads_classic::server::{self, AppState};
use ads_classic::sources::{AdsClient, SearchBackend};
use ads_classic::utils::HttpClient;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ads-classic - Classic-style web front end for the ADS search API
#[derive(Parser, Debug)]
#[command(name = "ads-classic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classic-style web front end for the ADS search API", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Run a query and print the result page in CGI framing
    #[command(alias = "q")]
    Query {
        /// Query in ADS syntax
        query: String,

        /// Classic sort name (SCORE, CITATIONS, AUTHOR, AUTHOR_CNT, NDATE, ODATE)
        #[arg(long, short)]
        sort: Option<String>,

        /// Offset of the first result
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Number of results (defaults to the configured page size)
        #[arg(long, short)]
        rows: Option<usize>,

        /// Request the extended field set
        #[arg(long)]
        extended: bool,
    },

    /// Print the full record of one bibcode in CGI framing
    #[command(alias = "abs")]
    Abstract {
        /// Bibcode of the record
        bibcode: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // One run context per process, taken before anything else happens
    let context = RunContext::start();
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    // stdout carries the page, so logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ads_classic={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => find_config_file(),
    };
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    let config = load_config(config_path.as_deref())?;

    let backend = build_backend(&config)?;

    match cli.command {
        None => serve(&config, backend, None, None).await,
        Some(Commands::Serve { host, port }) => serve(&config, backend, host, port).await,
        Some(Commands::Query {
            query,
            sort,
            start,
            rows,
            extended,
        }) => {
            let sort = match sort {
                Some(name) => SortMode::from_classic(&name),
                None => config.query.sort(),
            };
            let query = SearchQuery::new(query)
                .sort(sort)
                .start(start)
                .rows(rows.unwrap_or(config.query.default_rows))
                .extended(extended);
            let assembler = PageAssembler::new(context);
            let result = match backend.run_query(&query, &context).await {
                Ok(result) => result,
                Err(err) => {
                    print!("{}", assembler.render_error(&err.to_string()));
                    return Err(err.into());
                }
            };
            print!(
                "{}{}{}",
                assembler.render_header(
                    "ADS query results",
                    &format!("Query results for <i>{}</i>", escape_html(&query.query))
                ),
                render_table(&result, start, sort),
                assembler.render_footer(&result, "")
            );
            Ok(())
        }
        Some(Commands::Abstract { bibcode }) => {
            let assembler = PageAssembler::new(context);
            let query = SearchQuery::record(&bibcode).sort(None);
            let result = match backend.run_query(&query, &context).await {
                Ok(result) => result,
                Err(err) => {
                    print!("{}", assembler.render_error(&err.to_string()));
                    return Err(err.into());
                }
            };
            let Some(doc) = result.docs.first() else {
                let message = format!("Record not found: {}", bibcode);
                print!("{}", assembler.render_error(&message));
                bail!(message);
            };
            print!(
                "{}{}{}",
                assembler.render_header(&escape_html(&doc.bibcode), &title_text(doc)),
                render_abstract(doc),
                assembler.render_footer(&result, "")
            );
            Ok(())
        }
    }
}

fn build_backend(config: &Config) -> Result<Arc<dyn SearchBackend>> {
    let Some(token) = config.token() else {
        bail!("No API token configured; set ADS_TOKEN or [api] token in the config file");
    };
    let http = HttpClient::with_timeout(Duration::from_secs(config.api.timeout_secs))
        .context("failed to build HTTP client")?;
    let client = AdsClient::new(http, token).with_endpoint(config.api.endpoint.clone());
    tracing::debug!(endpoint = %client.endpoint(), "using ADS endpoint");
    Ok(Arc::new(client))
}

async fn serve(
    config: &Config,
    backend: Arc<dyn SearchBackend>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;

    let state = AppState::new(backend, config.query.clone());
    server::serve(addr, state).await?;
    Ok(())
}
