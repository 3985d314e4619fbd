use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use skycast::cli::{Cli, Command};
use skycast::config::{AssistantConfig, LoggingConfig};
use skycast::knowledge::RetrievalStrategy;
use skycast::llm::{GeminiClient, KnowledgeModel};
use skycast::{Assistant, chat_client, telemetry, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, the process environment is used as is
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command() {
        Command::Serve { port } => {
            let config = AssistantConfig::load_from_path(cli.config.clone())?;
            let _telemetry = telemetry::init(&config.logging)?;
            tracing::info!("Starting Skycast v{}", skycast::VERSION);

            let assistant = Arc::new(Assistant::from_config(&config)?);
            tracing::info!("Knowledge mode: {}", assistant.knowledge_mode());

            web::run(assistant, port.unwrap_or(config.server.port)).await
        }
        Command::Chat { url } => {
            let _telemetry = telemetry::init(&LoggingConfig {
                level: "warn".to_string(),
                ..LoggingConfig::default()
            })?;
            let client = chat_client::ChatClient::new(&url);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            chat_client::run(&client, stdin, tokio::io::stdout()).await
        }
        Command::DiagnoseKnowledge { query } => {
            let config = AssistantConfig::load_from_path(cli.config.clone())?;
            let _telemetry = telemetry::init(&config.logging)?;
            diagnose_knowledge(&config, &query).await
        }
    }
}

async fn diagnose_knowledge(config: &AssistantConfig, query: &str) -> anyhow::Result<()> {
    let store = config
        .gemini
        .store_id
        .clone()
        .context("GEMINI_STORE_ID is not set; file search cannot be diagnosed")?;

    println!("File search diagnostic");
    println!("Model: {}", config.gemini.model);
    println!("Store: {}", store);

    let model: Arc<dyn KnowledgeModel> = Arc::new(GeminiClient::new(&config.gemini)?);
    let strategy = RetrievalStrategy::FileSearch { store };

    match strategy.run(model.as_ref(), query).await {
        Ok(text) => {
            println!("\nSearch succeeded:\n{}", text);
            Ok(())
        }
        Err(err) => {
            println!("\nSearch failed: {}", err);
            if err.is_rate_limited() {
                println!("{}", skycast::knowledge::RATE_LIMIT_REPLY);
            }
            Err(err.into())
        }
    }
}
