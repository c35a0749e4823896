//! Local session harness.
//!
//! Plays the part of the hosted runtime's dispatcher: tool calls arrive as
//! JSON lines, run one after another against a single agent session, and each
//! result goes back as one JSON line. A usage summary is logged at shutdown.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::agents::Agent;
use crate::error::Result;
use crate::id::generate_call_id;
use crate::tools::{ToolCall, ToolContext, ToolResult};

/// One line of harness output
#[derive(Debug, Clone, Serialize)]
pub struct CallOutcome {
    pub id: String,
    pub name: String,
    pub is_error: bool,
    pub output: Value,
}

/// Counts collected over a session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageSummary {
    pub calls: usize,
    pub errors: usize,
    pub per_tool: BTreeMap<String, usize>,
    pub elapsed_ms: u128,
}

impl UsageSummary {
    fn record(&mut self, name: &str, result: &ToolResult) {
        self.calls += 1;
        if result.is_error {
            self.errors += 1;
        }
        *self.per_tool.entry(name.to_string()).or_default() += 1;
    }
}

/// Runs a stream of tool calls through one agent session
pub struct SessionRunner<'a> {
    agent: &'a Agent,
    ctx: ToolContext,
    usage: UsageSummary,
}

impl<'a> SessionRunner<'a> {
    pub fn new(agent: &'a Agent) -> Self {
        Self {
            agent,
            ctx: agent.context(),
            usage: UsageSummary::default(),
        }
    }

    /// Use a session ID supplied by the caller instead of a generated one
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.ctx = ToolContext::new(self.agent.name(), session_id);
        self
    }

    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// Parse and dispatch one input line
    pub async fn handle_line(&mut self, line: &str) -> CallOutcome {
        let index = self.usage.calls + 1;
        let call = match serde_json::from_str::<ToolCall>(line) {
            Ok(mut call) => {
                if call.id.is_empty() {
                    call.id = generate_call_id(index);
                }
                call
            }
            Err(e) => {
                let result = ToolResult::error(format!("Invalid tool call: {}", e));
                self.usage.record("<invalid>", &result);
                return CallOutcome {
                    id: generate_call_id(index),
                    name: String::new(),
                    is_error: true,
                    output: result.content,
                };
            }
        };

        let result = self.agent.call(&call, &self.ctx).await;
        self.usage.record(&call.name, &result);
        CallOutcome {
            id: call.id,
            name: call.name,
            is_error: result.is_error,
            output: result.content,
        }
    }

    /// Read calls until EOF, writing one result line per call.
    pub async fn run<R, W>(mut self, reader: R, mut writer: W) -> Result<UsageSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        log::info!("[{}] Session started for agent {}", self.ctx.session_id, self.agent.name());

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let outcome = self.handle_line(&line).await;
            let mut out = serde_json::to_string(&outcome)?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
            writer.flush().await?;
        }

        Ok(self.finish())
    }

    /// End the session and log its usage
    pub fn finish(mut self) -> UsageSummary {
        self.usage.elapsed_ms = self.ctx.elapsed_ms();
        log::info!(
            "[{}] Usage summary: {} calls, {} errors, per tool {:?}",
            self.ctx.session_id,
            self.usage.calls,
            self.usage.errors,
            self.usage.per_tool
        );
        self.usage
    }
}
