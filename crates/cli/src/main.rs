//! DocSearch CLI — search-as-you-type from the terminal.
//!
//! Drives `docsearch-core` directly: the same request gate, client and widget the
//! desktop app uses, with stdout standing in for the suggestion list.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};

use docsearch_core::client::{HttpSearchClient, SearchBackend};
use docsearch_core::load_config;
use docsearch_core::query::{prepare_search, SearchIntent};
use docsearch_core::render::interpret_response;
use docsearch_core::types::*;
use docsearch_core::widget::SearchWidget;

/// DocSearch CLI — query a document search endpoint from the terminal.
#[derive(Parser)]
#[command(name = "ds", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Search endpoint URL (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file (default: ./.docsearch.toml, then ~/.docsearch/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search and print the suggested titles
    Search {
        /// Search query
        query: String,

        /// Topic filter
        #[arg(long, default_value = "")]
        topic: String,

        /// Author filter
        #[arg(long, default_value = "")]
        author: String,

        /// Location filter
        #[arg(long, default_value = "")]
        location: String,
    },
    /// Type queries line by line; each line is debounced like a keystroke
    Interactive,
    /// Show the effective configuration
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Interactive line commands
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum LineCommand {
    /// New value of the search box
    Query(String),
    /// `:topic X`, `:author X`, `:location X`
    SetFilter(Filter, String),
    /// `:pick N` (1-based)
    Pick(usize),
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> LineCommand {
    let Some(rest) = line.strip_prefix(':') else {
        return LineCommand::Query(line.to_string());
    };

    let (cmd, arg) = rest.split_once(' ').unwrap_or((rest, ""));
    match cmd {
        "quit" | "q" => LineCommand::Quit,
        "topic" => LineCommand::SetFilter(Filter::Topic, arg.to_string()),
        "author" => LineCommand::SetFilter(Filter::Author, arg.to_string()),
        "location" => LineCommand::SetFilter(Filter::Location, arg.to_string()),
        "pick" => match arg.trim().parse::<usize>() {
            Ok(n) if n >= 1 => LineCommand::Pick(n),
            _ => LineCommand::Invalid(format!("expected :pick <number>, got ':{rest}'")),
        },
        _ => LineCommand::Invalid(format!("unknown command ':{cmd}'")),
    }
}

fn print_panel(panel: &SuggestionPanel, json: bool) {
    if json {
        let entries: Vec<&str> = panel.entries.iter().map(PanelEntry::text).collect();
        let output = serde_json::json!({ "visible": panel.visible, "entries": entries });
        println!("{output}");
        return;
    }

    if !panel.visible {
        println!("  (suggestions hidden)");
        return;
    }
    for (i, entry) in panel.entries.iter().enumerate() {
        match entry {
            PanelEntry::Suggestion(title) => println!("  {:>2}. {}", i + 1, title),
            PanelEntry::Placeholder(msg) => println!("      {msg}"),
        }
    }
}

async fn run_interactive(config: WidgetConfig, json: bool) -> i32 {
    let client = match HttpSearchClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };
    let settle_timeout = config.debounce() + config.request_timeout().unwrap_or(Duration::from_secs(10));
    let widget = SearchWidget::new(client, config);
    let mut panel_rx = widget.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !json {
        eprintln!("Type a query (:topic/:author/:location <value>, :pick <n>, :quit)");
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!(error = %e, "Could not read stdin");
                        return 1;
                    }
                };
                match parse_line(&line) {
                    LineCommand::Query(q) => widget.on_input_change(q),
                    LineCommand::SetFilter(filter, value) => widget.set_filter(filter, value),
                    LineCommand::Pick(n) => match widget.select_suggestion(n - 1) {
                        Some(title) if !json => println!("query = {title}"),
                        Some(_) => {}
                        None => eprintln!("No suggestion #{n}"),
                    },
                    LineCommand::Quit => return 0,
                    LineCommand::Invalid(msg) => eprintln!("{msg}"),
                }
            }
            changed = panel_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let panel = panel_rx.borrow_and_update().clone();
                print_panel(&panel, json);
            }
        }
    }

    // Input ended (piped input): let an armed or in-flight search land
    if tokio::time::timeout(settle_timeout, widget.settled()).await.is_err() {
        warn!("Gave up waiting for the last search");
    }
    if panel_rx.has_changed().unwrap_or(false) {
        let panel = panel_rx.borrow_and_update().clone();
        print_panel(&panel, json);
    }
    0
}

async fn run_search(config: WidgetConfig, fields: SearchFields, json: bool) -> i32 {
    let request = match prepare_search(&fields, config.min_query_chars) {
        SearchIntent::Search(request) => request,
        SearchIntent::Dismiss => {
            eprintln!("Query must be at least {} characters", config.min_query_chars);
            return 2;
        }
    };

    let client = match HttpSearchClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let data = match client.search(&request).await {
        Ok(data) => data,
        Err(e) => {
            error!(error = %e, "Error fetching data");
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let suggestions = interpret_response(&data);
    if json {
        let titles: Vec<String> = match suggestions {
            Suggestions::Titles(titles) => titles,
            Suggestions::NoData => Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&titles).unwrap_or_default());
    } else {
        match suggestions {
            Suggestions::Titles(titles) => {
                for title in &titles {
                    println!("{title}");
                }
                eprintln!("\n{} suggestions", titles.len());
            }
            Suggestions::NoData => println!("{NO_DATA_MESSAGE}"),
        }
    }
    0
}

fn resolve_config(cli: &Cli) -> WidgetConfig {
    let mut config = load_config(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    config
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docsearch=warn".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match &cli.command {
        Commands::Search { query, topic, author, location } => {
            let config = resolve_config(&cli);
            let fields = SearchFields {
                query: query.clone(),
                topic: topic.clone(),
                author: author.clone(),
                location: location.clone(),
            };
            run_search(config, fields, cli.json).await
        }
        Commands::Interactive => run_interactive(resolve_config(&cli), cli.json).await,
        Commands::Config => {
            let config = resolve_config(&cli);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&config).unwrap_or_default());
            } else {
                let timeout = config
                    .request_timeout_ms
                    .map(|ms| format!("{ms}ms"))
                    .unwrap_or_else(|| "none".to_string());
                println!("Endpoint:         {}", config.endpoint);
                println!("Debounce:         {}ms", config.debounce_ms);
                println!("Min query chars:  {}", config.min_query_chars);
                println!("Discard stale:    {}", config.discard_stale_responses);
                println!("Request timeout:  {timeout}");
            }
            0
        }
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "ds", &mut std::io::stdout());
            0
        }
    };
    std::process::exit(code);
}
