//! MindBridge application binary - composition root.
//!
//! Ties the MindBridge crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Build the resource catalog (seed data or a JSON file)
//! 3. Dispatch the subcommand: resource search, one-shot classification,
//!    or an interactive chat session driven by the tokio scheduler

mod cli;

use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use mindbridge_chat::{ChatMessage, ConversationSession, IntentClassifier, ResponseComposer, TokioScheduler};
use mindbridge_core::config::MindbridgeConfig;
use mindbridge_core::types::Coordinate;
use mindbridge_discovery::{
    resolve_origin, CategoryFilter, FixedLocation, GeolocationProvider, LocationStatus, NoLocation,
    QueryFilter, QueryResult, ResolvedLocation, ResourceCatalog, ResourceQueryEngine,
};

use cli::{CliArgs, Command};

const TYPING_POLL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = MindbridgeConfig::load_or_default(&config_file);

    // Tracing. Logs go to stderr so command output stays pipeable.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting MindBridge v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    match args.command {
        Command::Resources {
            search,
            filter,
            lat,
            lng,
            json,
        } => {
            let catalog = load_catalog(&config)?;
            let engine = ResourceQueryEngine::from_config(catalog, &config.discovery);
            run_resources(&engine, &config, &search, filter, lat.zip(lng), json)?;
        }
        Command::Classify { text } => {
            println!("{}", render_classification(&text.join(" ")));
        }
        Command::Chat => run_chat(&config).await?,
    }

    Ok(())
}

/// Catalog from `discovery.catalog_path`, or the built-in seed data.
fn load_catalog(config: &MindbridgeConfig) -> Result<ResourceCatalog, Box<dyn Error>> {
    match config.discovery.catalog_path {
        Some(ref path) => Ok(ResourceCatalog::load(Path::new(path))?),
        None => {
            tracing::debug!("Using built-in resource catalog");
            Ok(ResourceCatalog::seed())
        }
    }
}

// =============================================================================
// resources
// =============================================================================

fn run_resources(
    engine: &ResourceQueryEngine,
    config: &MindbridgeConfig,
    search: &str,
    category: CategoryFilter,
    origin: Option<(f64, f64)>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let provider: Box<dyn GeolocationProvider> = match origin {
        Some((lat, lng)) => Box::new(FixedLocation(Coordinate::try_new(lat, lng)?)),
        None => Box::new(NoLocation),
    };
    let location = resolve_origin(provider.as_ref(), config.discovery.fallback_coordinate()?);

    let filter = QueryFilter::new(location.coordinate)
        .with_search(search)
        .with_category(category);
    let result = engine.query(&filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_resources(&result, &location));
    }
    Ok(())
}

fn render_resources(result: &QueryResult, location: &ResolvedLocation) -> String {
    let mut out = String::new();
    let origin_note = match location.status {
        LocationStatus::Granted => "your location",
        LocationStatus::Denied => "default location",
    };
    out.push_str(&format!(
        "{} resource(s) near {} {}\n",
        result.count, origin_note, location.coordinate
    ));

    if result.is_empty() {
        if result.filtered {
            out.push_str("No resources match your search. Try different keywords or filters.\n");
        }
        return out;
    }

    for ranked in &result.resources {
        let r = &ranked.resource;
        out.push_str(&format!(
            "\n{} [{}] {}\n",
            r.name,
            r.category,
            ranked.distance_label()
        ));
        out.push_str(&format!("  {} | {} | {}\n", r.address, r.phone, r.hours));
        out.push_str(&format!(
            "  wait: {}  cost: {}  rating: {:.1}\n",
            r.wait_time, r.cost, r.rating
        ));
        out.push_str(&format!("  languages: {}\n", r.languages.join(", ")));
        if !r.features.is_empty() {
            out.push_str(&format!("  features: {}\n", r.features.join(", ")));
        }
    }
    out
}

// =============================================================================
// classify
// =============================================================================

fn render_classification(text: &str) -> String {
    let classification = IntentClassifier::new().classify_detailed(text);
    let reply = ResponseComposer::new().compose(classification.intent);

    let mut out = format!("intent: {}", classification.intent);
    if let Some(keyword) = classification.matched_keyword {
        out.push_str(&format!(" (matched \"{}\")", keyword));
    }
    out.push_str("\n\n");
    out.push_str(&reply.body);
    out.push('\n');
    for (i, s) in reply.suggestions.iter().enumerate() {
        out.push_str(&format!("\n  [{}] {}", i + 1, s));
    }
    out
}

// =============================================================================
// chat
// =============================================================================

async fn run_chat(config: &MindbridgeConfig) -> Result<(), Box<dyn Error>> {
    let scheduler = Arc::new(TokioScheduler::new(tokio::runtime::Handle::current()));
    let session = ConversationSession::new(scheduler, &config.chat);
    session.start();
    tracing::debug!(session_id = %session.id(), "Interactive chat started");

    let mut shown = print_assistant_messages(&session, 0);
    println!("\n(type a message, a suggestion number, or 'quit')");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        let last = session.last_assistant_message();
        let sent = match pick_suggestion(input, last.as_ref()) {
            Some(suggestion) => {
                session.select_suggestion(&suggestion);
                println!("you> {}", suggestion);
                session.send_draft()
            }
            None => session.send(input),
        };
        if sent.is_none() {
            continue;
        }

        println!("(assistant is typing...)");
        while session.is_composing() {
            tokio::time::sleep(TYPING_POLL).await;
        }
        shown = print_assistant_messages(&session, shown);
    }

    session.close();
    Ok(())
}

/// Print assistant messages appended since `shown`. Returns the new count.
fn print_assistant_messages(session: &ConversationSession, shown: usize) -> usize {
    let transcript = session.transcript();
    for message in transcript.iter().skip(shown).filter(|m| m.is_assistant()) {
        println!("\n{}", render_message(message));
    }
    transcript.len()
}

fn render_message(message: &ChatMessage) -> String {
    let mut out = format!("assistant> {}", message.text);
    for (i, s) in message.suggestions.iter().enumerate() {
        out.push_str(&format!("\n  [{}] {}", i + 1, s));
    }
    out
}

/// A 1-based suggestion number typed by the user, resolved against the last
/// assistant message.
fn pick_suggestion(input: &str, last: Option<&ChatMessage>) -> Option<String> {
    let n: usize = input.parse().ok()?;
    let index = n.checked_sub(1)?;
    last?.suggestions.get(index).cloned()
}
