//! mdview command-line interface.
//!
//! Two subcommands: `check` runs the URL gate and normalizers without
//! touching the network, and `fetch` runs the full pipeline and prints the
//! document to stdout. Diagnostics go to stderr so piped output stays clean.

mod config;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mdview_fetch::{
    TokenStripResult, UrlVerdict, check_markdown_url, load, normalize_gist_url,
    normalize_github_content_url, strip_github_token,
};

#[derive(Parser)]
#[command(name = "mdview")]
#[command(about = "Fetch and display markdown documents from vetted URLs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a URL against the policy without fetching (exit 1 if refused)
    Check {
        /// URL to inspect
        url: String,
        /// Emit the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch a markdown document and print it to stdout
    Fetch {
        /// URL to fetch
        url: String,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u32>,
        /// Maximum redirect hops
        #[arg(long)]
        max_redirects: Option<u32>,
        /// Maximum response size in bytes
        #[arg(long)]
        max_bytes: Option<u64>,
        /// Allow plain-HTTP URLs on loopback hosts (local testing)
        #[arg(long)]
        insecure_http: bool,
        /// Config file to use instead of the platform default
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { url, json } => run_check(&url, json),
        Commands::Fetch {
            url,
            timeout,
            max_redirects,
            max_bytes,
            insecure_http,
            config,
        } => {
            run_fetch(
                &url,
                timeout,
                max_redirects,
                max_bytes,
                insecure_http,
                config.as_deref(),
            )
            .await
        }
    }
}

fn run_check(url: &str, json: bool) -> Result<()> {
    let verdict = check_markdown_url(url);
    let normalized = normalize_gist_url(&normalize_github_content_url(url));
    let TokenStripResult {
        clean_url,
        had_token,
    } = strip_github_token(&normalized);

    if json {
        let report = serde_json::json!({
            "allowed": verdict.is_allowed(),
            "reason": verdict.reason().map(|reason| reason.code()),
            "message": verdict.reason().map(|reason| reason.to_string()),
            "fetch_url": clean_url,
            "had_token": had_token,
        });
        println!("{report}");
    } else {
        match verdict {
            UrlVerdict::Allowed => {
                println!("allowed");
                if clean_url != url {
                    println!("fetch URL: {clean_url}");
                }
                if had_token {
                    println!("note: an access token was removed from the URL");
                }
            }
            UrlVerdict::Rejected(reason) => {
                println!("rejected: {reason}");
            }
        }
    }

    if !verdict.is_allowed() {
        process::exit(1);
    }
    Ok(())
}

async fn run_fetch(
    url: &str,
    timeout: Option<u32>,
    max_redirects: Option<u32>,
    max_bytes: Option<u64>,
    insecure_http: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut load_config = config::load_config(config_path)?;
    if timeout.is_some() {
        load_config.timeout_seconds = timeout;
    }
    if max_redirects.is_some() {
        load_config.max_redirects = max_redirects;
    }
    if max_bytes.is_some() {
        load_config.max_body_bytes = max_bytes;
    }
    if insecure_http {
        tracing::warn!("plain-HTTP override enabled; loopback URLs will not require HTTPS");
        load_config.allow_insecure_http = true;
    }

    let doc = load(url, &load_config).await?;

    if doc.had_token {
        eprintln!("warning: the URL carried an access token; it was removed before fetching");
        eprintln!("         do not share the original link");
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(doc.markdown.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
