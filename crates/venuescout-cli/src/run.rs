//! Wires the HTTP collaborators into an agent and runs one request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::info;
use venuescout_ai::{AgentConfig, VenueAgent};
use venuescout_core::FinalRecord;
use venuescout_web::{
    ChatClient, ChatSettings, DuckDuckGoSearch, HttpScraper, VisionCaptioner, build_client,
};

use crate::display::print_venue_card;
use crate::{Args, OutputFormat};

pub struct RunStats {
    pub venues: usize,
    pub elapsed_secs: f64,
}

pub fn agent_config(args: &Args) -> AgentConfig {
    AgentConfig {
        qualifier: args.qualifier.clone(),
        stop_when_quiescent: args.stop_when_quiescent,
        ..AgentConfig::default()
    }
}

pub fn build_agent(args: &Args) -> anyhow::Result<VenueAgent> {
    let http = build_client(Duration::from_secs(args.http_timeout_secs))
        .context("building HTTP client")?;

    let chat = ChatClient::new(
        http.clone(),
        ChatSettings {
            base_url: args.llm_base_url.clone(),
            api_key: args.llm_api_key.clone(),
            model: args.llm_model.clone(),
            max_tokens: args.max_tokens,
            temperature: args.temperature,
        },
    );
    let vision = match &args.vision_model {
        Some(model) => chat.with_model(model.clone()),
        None => chat.clone(),
    };

    Ok(VenueAgent::new(
        Arc::new(DuckDuckGoSearch::new(http.clone(), args.search_region.clone())),
        Arc::new(HttpScraper::new(http.clone(), args.scrape_limit)),
        Arc::new(chat),
        Arc::new(VisionCaptioner::new(http, vision)),
        agent_config(args),
    ))
}

/// Run the request described by `args` and write the result to stdout.
pub async fn execute(args: &Args) -> anyhow::Result<()> {
    let agent = build_agent(args)?;
    let start = Instant::now();
    let records = agent
        .extract_locations(&args.query, args.num_results, args.num_iterations)
        .await?;
    let stats = RunStats {
        venues: records.len(),
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    info!(
        venues = stats.venues,
        elapsed_secs = stats.elapsed_secs,
        "request complete"
    );
    emit(&records, args.format)
}

fn emit(records: &[FinalRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(records).context("serialising records")?;
            println!("{json}");
        }
        OutputFormat::Card => {
            if records.is_empty() {
                println!("No venues found.");
            }
            for record in records {
                print_venue_card(record);
            }
        }
    }
    Ok(())
}
