use clap::{Parser, Subcommand};
use std::sync::Arc;

use chatops_bot::application::errors::{BotError, ConfigError};
use chatops_bot::application::messaging::CommandRouter;
use chatops_bot::application::services::EventService;
use chatops_bot::domain::traits::{ChatCapability, TicketCapability};
use chatops_bot::infrastructure::adapters::{ConsoleAdapter, SlackAdapter};
use chatops_bot::infrastructure::config::Config;
use chatops_bot::infrastructure::http::{self, AppState};
use chatops_bot::infrastructure::http_client;
use chatops_bot::infrastructure::llm::{build_provider, LlmAssistant, LLM};
use chatops_bot::infrastructure::tickets::JiraTickets;

#[derive(Parser)]
#[command(name = "chatops-bot")]
#[command(about = "Chat-ops command router for Slack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the Slack events webhook
    Run,
    /// Route commands typed on stdin (dev mode)
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => with_runtime(run_server(cli.config)),
        Commands::Console => with_runtime(run_console(cli.config)),
        Commands::Version => {
            println!("chatops-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}

fn with_runtime<F>(fut: F) -> Result<(), BotError>
where
    F: std::future::Future<Output = Result<(), BotError>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("failed to start runtime: {}", e)))?;
    rt.block_on(fut)
}

fn load_config(path: &str) -> Config {
    if std::path::Path::new(path).exists() {
        Config::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    }
}

/// Wire the router with the given chat capability and configured AI/tickets
fn build_router(config: &Config, chat: Arc<dyn ChatCapability>) -> Result<CommandRouter, BotError> {
    let llm = build_provider(&config.llm)?;
    tracing::info!(provider = llm.name(), "AI provider ready");
    let ai = Arc::new(LlmAssistant::new(llm, &config.llm));

    let mut router = CommandRouter::new(chat, ai).with_system_prompt(&config.bot.assistant_prompt);

    if let Some(ticket_config) = &config.tickets {
        let client = http_client(ticket_config.timeout_secs)?;
        let tickets: Arc<dyn TicketCapability> = Arc::new(JiraTickets::new(ticket_config, client));
        router = router.with_tickets(tickets);
        tracing::info!(project = %ticket_config.project_key, "Ticketing enabled");
    }

    Ok(router)
}

async fn run_server(config_path: String) -> Result<(), BotError> {
    let config = load_config(&config_path);
    config.validate()?;
    tracing::info!("Starting {}", config.bot.name);

    let token = config
        .slack
        .bot_token
        .clone()
        .ok_or_else(|| ConfigError::MissingField("slack.bot-token".to_string()))?;
    let client = http_client(config.slack.timeout_secs)?;
    let chat: Arc<dyn ChatCapability> =
        Arc::new(SlackAdapter::new(token, &config.slack.api_base, client));

    let router = build_router(&config, chat)?;
    let events = EventService::new(Arc::new(router), config.server.max_workers);

    http::serve(&config.bind_addr(), AppState::new(Arc::new(events))).await
}

async fn run_console(config_path: String) -> Result<(), BotError> {
    let config = load_config(&config_path);
    let console = Arc::new(ConsoleAdapter::new());
    let router = build_router(&config, console.clone())?;

    tracing::info!("Console mode, type commands (Ctrl-D to quit)");

    while let Some(input) = console.read_line("> ").await {
        router.route_text(&input, "console").await;
    }

    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| BotError::Internal(format!("failed to render config: {}", e)))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
