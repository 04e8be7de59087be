mod display;
mod run;

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use venuescout_ai::AgentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of venue records
    Json,
    /// One human-readable card per venue
    Card,
}

#[derive(Parser, Debug)]
#[command(
    name = "venuescout",
    version,
    about = "Find venues on the web and extract structured records for them"
)]
pub struct Args {
    /// What to look for, e.g. "ramen" or "weekend flea markets"
    pub query: String,

    /// Maximum number of venues to return
    #[arg(short = 'n', long, default_value_t = 10)]
    pub num_results: usize,

    /// Refinement rounds per venue
    #[arg(short = 'i', long, default_value_t = 2)]
    pub num_iterations: usize,

    /// Stop refining a venue once the model asks for no more searches
    #[arg(long)]
    pub stop_when_quiescent: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, env = "VENUESCOUT_LLM_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub llm_base_url: String,

    #[arg(long, env = "VENUESCOUT_LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: String,

    #[arg(long, env = "VENUESCOUT_LLM_MODEL", default_value = "gpt-4o-mini")]
    pub llm_model: String,

    /// Vision model for image captions [default: the LLM model]
    #[arg(long, env = "VENUESCOUT_VISION_MODEL")]
    pub vision_model: Option<String>,

    #[arg(long, env = "VENUESCOUT_MAX_TOKENS", default_value_t = 1024)]
    pub max_tokens: u32,

    #[arg(long, env = "VENUESCOUT_TEMPERATURE", default_value_t = 0.2)]
    pub temperature: f32,

    /// DuckDuckGo region code
    #[arg(long, env = "VENUESCOUT_SEARCH_REGION", default_value = "sg-en")]
    pub search_region: String,

    /// Appended to search queries that do not already mention it
    #[arg(long, env = "VENUESCOUT_QUALIFIER", default_value = "Singapore")]
    pub qualifier: String,

    /// Characters of page text handed to the model
    #[arg(long, env = "VENUESCOUT_SCRAPE_LIMIT", default_value_t = 10_000)]
    pub scrape_limit: usize,

    #[arg(long, env = "VENUESCOUT_HTTP_TIMEOUT_SECS", default_value_t = 20)]
    pub http_timeout_secs: u64,
}

/// `RUST_LOG` when set and valid, otherwise info (debug with `--verbose`).
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    info!("venuescout v{}", env!("CARGO_PKG_VERSION"));

    match run::execute(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<AgentError>() {
            Some(AgentError::PolicyIntervention(reason)) => {
                eprintln!("Request refused by content policy: {reason}");
                ExitCode::from(2)
            }
            None => {
                error!(error = %err, "extraction failed");
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}
