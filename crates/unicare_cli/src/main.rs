mod display;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use unicare_core::{Facts, Topic, UnicareConfig, UserId};
use unicare_dialogue::DialogueEngine;
use unicare_gateway::{ChatResponse, GatewayServer};

#[derive(Parser, Debug)]
#[command(name = "unicare", author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = "unicare.toml")]
    config: PathBuf,

    /// Rule book replacing the built-in one
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat in the terminal (default)
    Chat {
        /// Signed-in user; facts are kept between sessions
        #[arg(long)]
        user_id: Option<String>,

        /// Facts file to load and update after every turn
        #[arg(long)]
        facts_file: Option<PathBuf>,
    },
    /// Run a single turn and print the result as JSON
    Say {
        message: String,

        /// Topic returned by the previous turn
        #[arg(long)]
        topic: Option<String>,

        /// Facts returned by the previous turn, as JSON
        #[arg(long)]
        facts: Option<String>,
    },
    /// Serve the chat endpoint over HTTP until Ctrl-C
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Chat {
        user_id: None,
        facts_file: None,
    });

    let default_level = match command {
        Command::Serve { .. } => "info",
        _ => "warn",
    };
    init_logging(args.log_json, default_level);

    let mut config = UnicareConfig::load_or_default(&args.config);
    if let Some(rules) = args.rules {
        config.dialogue.rules_path = Some(rules);
    }
    let engine = DialogueEngine::from_config(&config.dialogue)?;

    match command {
        Command::Chat {
            user_id,
            facts_file,
        } => run_chat(&engine, &config, user_id, facts_file),
        Command::Say {
            message,
            topic,
            facts,
        } => run_say(&engine, &message, topic, facts),
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.gateway.host);
            let port = port.unwrap_or(config.gateway.port);
            run_serve(engine, &host, port).await
        }
    }
}

fn init_logging(json: bool, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_chat(
    engine: &DialogueEngine,
    config: &UnicareConfig,
    user_id: Option<String>,
    facts_file: Option<PathBuf>,
) -> Result<()> {
    let user_id = user_id.as_deref().map(UserId::from);
    let path = store::facts_path(
        facts_file.as_deref(),
        config.session.facts_dir.as_deref(),
        user_id.as_ref(),
    );

    let mut facts = match &path {
        Some(path) => store::load_facts(path)?,
        None => Facts::default(),
    };
    if user_id.is_some() {
        facts.user_id = user_id;
    }
    let mut topic: Option<Topic> = None;

    let mut rl = DefaultEditor::new()?;
    println!("UNICARE is listening. Type 'quit' to exit.");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }
        if !trimmed.is_empty() {
            let _ = rl.add_history_entry(trimmed);
        }

        let turn = engine.respond(&line, topic, &facts);
        println!("\nUNICARE: {}\n", display::plain_text(&turn.reply));
        topic = turn.topic;
        facts = turn.facts;

        if let Some(path) = &path {
            if let Err(e) = store::save_facts(path, &facts) {
                error!("{:#}", e);
            }
        }
    }

    Ok(())
}

fn run_say(
    engine: &DialogueEngine,
    message: &str,
    topic: Option<String>,
    facts: Option<String>,
) -> Result<()> {
    let last_topic = topic.as_deref().and_then(Topic::parse);
    let facts: Facts = match facts {
        Some(json) => serde_json::from_str(&json).context("Invalid --facts JSON")?,
        None => Facts::default(),
    };
    let turn = engine.respond(message, last_topic, &facts);
    println!("{}", serde_json::to_string(&ChatResponse::from(turn))?);
    Ok(())
}

async fn run_serve(engine: DialogueEngine, host: &str, port: u16) -> Result<()> {
    let server = GatewayServer::new(Arc::new(engine), host, port);
    let handle = server.start();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
        res = handle => {
            if let Err(e) = res {
                error!("Gateway task failed: {}", e);
            }
        }
    }
    Ok(())
}
