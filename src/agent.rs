//! Model-backed agents: a single tool-calling agent and a sequential composition of them.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use genai::{
    Client,
    chat::{ChatMessage, ChatRequest, MessageContent, Tool, ToolResponse},
};
use tracing::{Instrument, debug, error, info, span};

use crate::{config::Config, error::AppError, tools::make_tool_call};

/// Anything that can answer a chat request on behalf of a model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends the conversation and returns the reply content, if the model produced any.
    async fn exec_chat(
        &self,
        model: &str,
        chat_req: ChatRequest,
    ) -> Result<Option<MessageContent>, AppError>;
}

#[async_trait]
impl ChatModel for Client {
    async fn exec_chat(
        &self,
        model: &str,
        chat_req: ChatRequest,
    ) -> Result<Option<MessageContent>, AppError> {
        let response = Client::exec_chat(self, model, chat_req, None).await?;
        Ok(response.content)
    }
}

/// Key/value state shared by the stages of a sequential run.
#[derive(Debug, Default, Clone)]
pub struct Session {
    state: HashMap<String, String>,
}

impl Session {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.state.insert(key.into(), value.into());
    }

    /// Replaces every `{key}` in `template` with the stored value. Unknown keys stay as written.
    ///
    /// The template is scanned once; inserted values are never expanded again.
    pub fn render(&self, template: &str) -> String {
        let mut rendered = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                rest = &rest[open..];
                break;
            };
            let key = &after[..close];
            match self.state.get(key) {
                Some(value) => rendered.push_str(value),
                None => rendered.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }
        rendered.push_str(rest);
        rendered
    }
}

/// An agent pairing a model with an instruction and a set of callable tools.
#[derive(Debug, Clone)]
pub struct LlmAgent {
    pub name: String,
    pub description: String,
    model: String,
    instruction: String,
    tools: Vec<Tool>,
    output_key: Option<String>,
    tool_concurrency: usize,
    max_tool_rounds: usize,
}

impl LlmAgent {
    pub fn new(name: &str, config: &Config) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            model: config.model.clone(),
            instruction: String::new(),
            tools: Vec::new(),
            output_key: None,
            tool_concurrency: config.tool_concurrency.max(1),
            max_tool_rounds: config.max_tool_rounds,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_instruction(mut self, instruction: &str) -> Self {
        self.instruction = instruction.to_string();
        self
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    /// Session key under which a sequential run stores this agent's final text.
    pub fn with_output_key(mut self, key: &str) -> Self {
        self.output_key = Some(key.to_string());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn output_key(&self) -> Option<&str> {
        self.output_key.as_deref()
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Builds an empty conversation carrying the rendered instruction and the tool declarations.
    pub fn start_chat(&self, session: &Session) -> ChatRequest {
        let chat_req = ChatRequest::default().with_system(session.render(&self.instruction));
        if self.tools.is_empty() {
            chat_req
        } else {
            chat_req.with_tools(self.tools.clone())
        }
    }

    /// Continuously make calls to the model until no more tool responses are returned.
    ///
    /// After every round of tool calls the model is asked again, so it can use the results.
    /// More than `max_tool_rounds` consecutive rounds fail with `ToolRoundsExceeded`.
    pub async fn call_loop<M: ChatModel + ?Sized>(
        &self,
        client: &M,
        chat_req: ChatRequest,
    ) -> Result<ChatRequest, AppError> {
        let mut chat_req = self.make_call(client, chat_req).await?;
        let mut rounds = 0;
        while let Some(last_message) = chat_req.messages.last() {
            if let MessageContent::ToolResponses(_) = last_message.content {
                rounds += 1;
                if rounds > self.max_tool_rounds {
                    return Err(AppError::ToolRoundsExceeded {
                        agent: self.name.clone(),
                        limit: self.max_tool_rounds,
                    });
                }
                debug!("Tool call response detected, making another call to the model");
                chat_req = self.make_call(client, chat_req).await?;
            } else {
                break;
            }
        }

        Ok(chat_req)
    }

    /// Make a call to the model and process the response.
    async fn make_call<M: ChatModel + ?Sized>(
        &self,
        client: &M,
        chat_req: ChatRequest,
    ) -> Result<ChatRequest, AppError> {
        debug!("Sending request to the model: {:?}", chat_req.messages);
        let content = client.exec_chat(&self.model, chat_req.clone()).await?;

        let req: ChatRequest = match content {
            Some(MessageContent::Text(text)) => {
                chat_req.append_message(ChatMessage::assistant(text.trim()))
            }
            Some(MessageContent::ToolCalls(tool_calls)) => {
                // remember the tool calls to append them to the chat request
                let chat_req = chat_req.append_message(ChatMessage::assistant(
                    MessageContent::ToolCalls(tool_calls.clone()),
                ));

                let tool_responses: Vec<ToolResponse> = stream::iter(tool_calls)
                    .map(|tool_call| async move { make_tool_call(tool_call).await })
                    .buffer_unordered(self.tool_concurrency)
                    .collect::<Vec<ToolResponse>>()
                    .await;

                debug!("Tool responses: {:#?}", tool_responses);

                tool_responses
                    .into_iter()
                    .fold(chat_req, |chat_req, next| chat_req.append_message(next))
            }
            Some(_) => {
                error!("{}: unsupported response type", self.name);
                chat_req.append_message(ChatMessage::assistant("Unsupported response type"))
            }
            None => {
                error!("{}: no response", self.name);
                chat_req.append_message(ChatMessage::assistant("No response"))
            }
        };

        Ok(req)
    }
}

/// Text of the last message, if it is a text message.
pub fn last_text(chat_req: &ChatRequest) -> Option<&str> {
    match chat_req.messages.last().map(|m| &m.content) {
        Some(MessageContent::Text(text)) => Some(text.as_str()),
        _ => None,
    }
}

/// Runs sub-agents one after another over a shared session.
#[derive(Debug, Clone)]
pub struct SequentialAgent {
    pub name: String,
    pub description: String,
    sub_agents: Vec<LlmAgent>,
}

impl SequentialAgent {
    pub fn new(name: &str, description: &str, sub_agents: Vec<LlmAgent>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            sub_agents,
        }
    }

    pub fn sub_agents(&self) -> &[LlmAgent] {
        &self.sub_agents
    }

    /// Feeds `user_request` to every stage in order and returns the last stage's text.
    ///
    /// Each stage sees the outputs of earlier stages through its instruction template.
    pub async fn run<M: ChatModel + ?Sized>(
        &self,
        client: &M,
        user_request: &str,
        session: &mut Session,
    ) -> Result<String, AppError> {
        let mut output = String::new();
        for agent in &self.sub_agents {
            let chat_req = agent
                .start_chat(session)
                .append_message(ChatMessage::user(user_request.to_string()));

            let chat_req = agent
                .call_loop(client, chat_req)
                .instrument(span!(tracing::Level::INFO, "stage", agent = agent.name.as_str()))
                .await?;

            output = last_text(&chat_req)
                .filter(|text| !text.is_empty())
                .ok_or_else(|| AppError::EmptyStageOutput(agent.name.clone()))?
                .to_string();
            info!("{} finished ({} chars)", agent.name, output.len());

            if let Some(key) = agent.output_key() {
                session.insert(key, output.clone());
            }
        }

        Ok(output)
    }
}
