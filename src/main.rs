use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use voicedesk::config::{self, GlobalConfig};
use voicedesk::session::SessionRunner;
use voicedesk::tools::ToolCall;
use voicedesk::{Agent, AgentKind};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voicedesk")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("voicedesk.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_agent(name: &str, config: &GlobalConfig) -> Result<Agent> {
    let kind: AgentKind = name.parse()?;
    kind.build(config).context(format!("Failed to build agent '{}'", kind))
}

async fn run_application(cli: &Cli, config: &GlobalConfig) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
        for (key, path) in config.paths.entries() {
            eprintln!("  {} {}", format!("{}:", key).dimmed(), path.display());
        }
    }

    match &cli.command {
        Commands::Agents => handle_agents_command(),
        Commands::Manifest { agent, compact } => handle_manifest_command(agent, *compact, config),
        Commands::Call { agent, tool, input } => handle_call_command(agent, tool, input, config).await,
        Commands::Session { agent, session_id } => handle_session_command(agent, session_id.as_deref(), config).await,
    }
}

fn handle_agents_command() -> Result<()> {
    for kind in AgentKind::ALL {
        println!("{:<8} {}", kind.name().green().bold(), kind.summary());
    }
    Ok(())
}

fn handle_manifest_command(agent: &str, compact: bool, config: &GlobalConfig) -> Result<()> {
    info!("Printing manifest for agent: {}", agent);
    let agent = build_agent(agent, config)?;
    let manifest = agent.manifest();
    let out = if compact {
        serde_json::to_string(&manifest)?
    } else {
        serde_json::to_string_pretty(&manifest)?
    };
    println!("{}", out);
    Ok(())
}

async fn handle_call_command(agent: &str, tool: &str, input: &str, config: &GlobalConfig) -> Result<()> {
    info!("Calling {}.{} with {}", agent, tool, input);
    let agent = build_agent(agent, config)?;
    let input: serde_json::Value = serde_json::from_str(input).context("--input must be a JSON object")?;
    if !input.is_object() {
        return Err(eyre!("--input must be a JSON object, got: {}", input));
    }

    let ctx = agent.context();
    let result = agent.call(&ToolCall::new("call_1", tool, input), &ctx).await;

    if result.is_error {
        eprintln!("{} {}", "Error:".red().bold(), result.content.as_str().unwrap_or_default());
        std::process::exit(1);
    }
    println!("{}", serde_json::to_string_pretty(&result.content)?);
    Ok(())
}

async fn handle_session_command(agent: &str, session_id: Option<&str>, config: &GlobalConfig) -> Result<()> {
    let agent = build_agent(agent, config)?;
    let mut runner = SessionRunner::new(&agent);
    if let Some(id) = session_id {
        runner = runner.with_session_id(id);
    }
    eprintln!(
        "{} {} ({})",
        "Session:".cyan(),
        agent.name(),
        runner.context().session_id
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let usage = runner.run(stdin, tokio::io::stdout()).await?;

    eprintln!(
        "{} {} calls, {} errors",
        "Session ended:".cyan(),
        usage.calls,
        usage.errors
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
