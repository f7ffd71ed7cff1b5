//! Binary entry point: configuration, wiring, and the interactive loop.

use std::sync::Arc;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pitchside::agent::Agent;
use pitchside::cli::{Cli, Commands};
use pitchside::config::AppConfig;
use pitchside::football::{FootballApiClient, TeamService};
use pitchside::providers::{AzureOpenAiProvider, ChatOptions};
use pitchside::search;
use pitchside::tools::{PlayerInfoTool, PlayersByPositionTool, TeamInfoTool};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("Failed to start the application: {e}");
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pitchside=debug"
    } else {
        "pitchside=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let client = Arc::new(FootballApiClient::new(&config.football));
    let service = Arc::new(TeamService::new(client, config.cache_ttl_hours));

    if let Some(Commands::Positions) = cli.command {
        let teams = service.teams().await?;
        println!("Available player positions:");
        for position in search::list_positions(&teams) {
            println!("  {position}");
        }
        return Ok(());
    }

    info!("Initializing Premier League agent");
    let provider = AzureOpenAiProvider::from_config(&config.azure);
    let agent = Agent::builder()
        .provider(provider)
        .tool(PlayerInfoTool::new(service.clone()))
        .tool(TeamInfoTool::new(service.clone()))
        .tool(PlayersByPositionTool::new(service))
        .options(ChatOptions::new().with_max_tokens(config.max_completion_tokens))
        .build()?;

    chat_loop(&agent).await
}

async fn chat_loop(agent: &Agent) -> anyhow::Result<()> {
    println!("\n🏆 Premier League Info Agent is ready!");
    println!("Ask me about Premier League teams, players, or positions.");
    println!("Type 'exit' to quit.\n");

    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("❓ Your question: ") {
            Ok(line) => {
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                if matches!(question.to_lowercase().as_str(), "exit" | "quit" | "q") {
                    println!("👋 Goodbye!");
                    break;
                }
                let _ = editor.add_history_entry(question);

                println!("\n🤔 Processing your question...");
                match agent.chat(question).await {
                    Ok(answer) => {
                        println!("\n✅ {answer}\n");
                        println!("{}", "-".repeat(80));
                    }
                    Err(e) => {
                        error!("Error processing query: {e}");
                        println!("❌ I encountered an error while processing your question: {e}");
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("👋 Goodbye!");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
