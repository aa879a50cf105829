//! Financial research team CLI
//!
//! An interactive shell over the research team: a web-search delegate and a
//! finance delegate behind one coordinating agent.
//!
//! # Usage
//!
//! ```bash
//! # Set up the model provider credential
//! export GROQ_API_KEY="gsk-..."
//!
//! # Interactive shell
//! cargo run --bin finagent -p finagent-research
//!
//! # One-shot query
//! cargo run --bin finagent -p finagent-research -- --query "AAPL price today"
//! ```

use clap::Parser;
use comfy_table::{Table, presets::UTF8_FULL};
use finagent_llm::providers::GroqProvider;
use finagent_research::api::YahooFinanceClient;
use finagent_research::shell::{BUSY_MESSAGE, Shell, ShellOutput};
use finagent_research::{ResearchTeamAgent, TeamConfig};
use finagent_runtime::AgentRuntime;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "finagent")]
#[command(about = "Financial research agent team", long_about = None)]
struct Args {
    /// Run a single query and exit instead of starting the shell
    #[arg(short, long)]
    query: Option<String>,

    /// Model id to use (overrides FINAGENT_MODEL)
    #[arg(short, long)]
    model: Option<String>,
}

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║                  Financial Research Team                     ║
║                                                              ║
║  Commands:                                                   ║
║    /overview          - Market overview of the watchlist     ║
║    /help              - Show help                            ║
║    /exit              - Exit                                 ║
║                                                              ║
║  Or ask in natural language:                                 ║
║    "Tesla stock analysis"                                    ║
║    "Apple quarterly earnings"                                ║
║    "Google recent financial news"                            ║
║    "Market trends for renewable energy"                      ║
╚══════════════════════════════════════════════════════════════╝
"#
    );
}

fn print_help() {
    println!(
        "Financial Research Team Commands:\n\
         /overview - Show current quotes for the watchlist\n\
         /help     - Show this help\n\
         /exit     - Exit\n\
         \n\
         Anything else is sent to the research team as a query."
    );
}

/// Render a watchlist quote table
///
/// A symbol that fails to fetch renders as an n/a row; the overview never
/// aborts on a single bad symbol.
async fn market_overview(client: &YahooFinanceClient, watchlist: &[String]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Symbol", "Close", "High", "Low", "Volume"]);

    for symbol in watchlist {
        match client.get_quote(symbol).await {
            Ok(quote) => {
                table.add_row(vec![
                    quote.symbol,
                    format!("{:.2}", quote.close),
                    format!("{:.2}", quote.high),
                    format!("{:.2}", quote.low),
                    quote.volume.to_string(),
                ]);
            }
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Quote fetch failed");
                table.add_row(vec![
                    symbol.clone(),
                    "n/a".to_string(),
                    "n/a".to_string(),
                    "n/a".to_string(),
                    "n/a".to_string(),
                ]);
            }
        }
    }

    table.to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    finagent_utils::init_tracing();

    let args = Args::parse();

    // Single required credential, read once at startup
    let provider = match GroqProvider::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Set GROQ_API_KEY to your Groq API key and try again.");
            std::process::exit(1);
        }
    };

    let mut config = TeamConfig::default().from_env_model();
    if let Some(model) = args.model {
        config.model = model;
    }
    config.validate()?;
    let config = Arc::new(config);

    let runtime = AgentRuntime::builder()
        .provider(provider)
        .default_model(config.model.clone())
        .build()?;

    let team = ResearchTeamAgent::new(&runtime, Arc::clone(&config))?;
    let mut shell = Shell::new(Arc::new(team));

    // One-shot mode
    if let Some(query) = args.query {
        println!("{BUSY_MESSAGE}");
        match shell.submit(&query).await {
            ShellOutput::Markdown(md) => println!("{md}"),
            ShellOutput::Validation(msg) => {
                eprintln!("{msg}");
                std::process::exit(1);
            }
            ShellOutput::Error(msg) => {
                eprintln!("{msg}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    print_banner();
    println!("Model: {}\n", config.model);

    let overview_client = YahooFinanceClient::new(config.request_timeout)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("finagent> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();

        match input {
            "/exit" => {
                println!("Goodbye!");
                break;
            }
            "/help" => {
                print_help();
                continue;
            }
            "/overview" => {
                println!("{}\n", market_overview(&overview_client, &config.watchlist).await);
                continue;
            }
            _ => {}
        }

        // Empty input is handled by the shell's validation path
        if !input.is_empty() {
            println!("{BUSY_MESSAGE}");
        }

        match shell.submit(input).await {
            ShellOutput::Markdown(md) => println!("{md}\n"),
            ShellOutput::Validation(msg) => println!("{msg}\n"),
            ShellOutput::Error(msg) => eprintln!("{msg}\n"),
        }
    }

    Ok(())
}
