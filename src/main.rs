mod agent;
mod clock;
mod config;
mod error;
mod office;
mod shop;
mod shorts;
mod tools;

use std::io::{self, BufRead, Write};

use clap::Parser;
use genai::{
    Client,
    chat::{ChatMessage, ChatRequest},
};
use tracing::{Instrument, error, info, span};
use tracing_subscriber::EnvFilter;

use crate::{
    agent::{LlmAgent, SequentialAgent, Session, last_text},
    config::{AgentKind, Config},
    error::AppError,
};

/// The agent behind the terminal session.
enum Assistant {
    /// Keeps one conversation across all user lines
    Office { agent: LlmAgent, chat_req: ChatRequest },
    /// Runs the whole pipeline for every user line
    Shorts(SequentialAgent),
}

impl Assistant {
    fn new(config: &Config) -> Self {
        match config.agent {
            AgentKind::Office => {
                let agent = office::office_agent(config);
                let chat_req = agent.start_chat(&Session::default());
                Assistant::Office { agent, chat_req }
            }
            AgentKind::Shorts => Assistant::Shorts(shorts::shorts_agent(config)),
        }
    }

    fn name(&self) -> &str {
        match self {
            Assistant::Office { agent, .. } => &agent.name,
            Assistant::Shorts(pipeline) => &pipeline.name,
        }
    }

    fn description(&self) -> &str {
        match self {
            Assistant::Office { agent, .. } => &agent.description,
            Assistant::Shorts(pipeline) => &pipeline.description,
        }
    }

    /// Answers one user line. On failure the office conversation is left as it was.
    async fn respond(&mut self, client: &Client, user_request: &str) -> anyhow::Result<String> {
        match self {
            Assistant::Office { agent, chat_req } => {
                let next = chat_req
                    .clone()
                    .append_message(ChatMessage::user(user_request.to_string()));
                let next = agent
                    .call_loop(client, next)
                    .instrument(span!(tracing::Level::INFO, "call_loop"))
                    .await?;
                let answer = last_text(&next).unwrap_or_default().to_string();
                *chat_req = next;
                Ok(answer)
            }
            Assistant::Shorts(pipeline) => {
                let mut session = Session::default();
                let answer = pipeline
                    .run(client, user_request, &mut session)
                    .instrument(span!(tracing::Level::INFO, "call_loop"))
                    .await?;
                Ok(answer)
            }
        }
    }
}

fn prompt() -> Result<(), AppError> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

/// Reads the next user line. Returns `None` at end of input.
fn read_request<'a>(
    input: &mut impl BufRead,
    buffer: &'a mut String,
) -> Result<Option<&'a str>, AppError> {
    buffer.clear();
    if input.read_line(buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim_start_matches('>').trim()))
}

/// Loads `.env`, initializes tracing and talks to the selected agent until the user
/// sends `exit` or closes the input.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let client = Client::default();
    let mut assistant = Assistant::new(&config);

    span!(tracing::Level::INFO, "chat", role = "assistant").in_scope(|| {
        info!("Hi, I'm {} (model {})", assistant.name(), config.model);
        info!("{}", assistant.description());
        info!("Send `exit` to stop");
    });

    let mut input = io::stdin().lock();
    let mut buffer = String::new();
    loop {
        prompt()?;
        let user_request = match read_request(&mut input, &mut buffer) {
            Ok(Some(user_request)) => user_request,
            Ok(None) => break,
            Err(AppError::IoError(e)) if e.kind() == io::ErrorKind::InvalidData => {
                error!("Skipping unreadable input: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if user_request == "exit" {
            info!("User wants to exit");
            break;
        }
        if user_request.is_empty() {
            continue;
        }

        span!(tracing::Level::INFO, "chat", role = "user").in_scope(|| {
            info!(user_request);
        });

        match assistant.respond(&client, user_request).await {
            Ok(answer) => span!(tracing::Level::INFO, "chat", role = "assistant")
                .in_scope(|| info!("{}", answer)),
            Err(e) => error!("{} failed: {}", assistant.name(), e),
        }
    }

    Ok(())
}
