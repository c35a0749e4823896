//! Tool system for voice agents
//!
//! Tools are the callables an agent registers with the hosted voice runtime.
//! The LLM picks a tool, the runtime dispatches the call here, and the JSON
//! output goes back into the conversation. Each call gets a ToolContext for
//! the session it belongs to.

mod context;
mod executor;

pub use context::ToolContext;
pub use executor::ToolExecutor;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::VoiceDeskError;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the function name the LLM calls)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error>;
}

/// Result from tool execution
///
/// Domain outcomes such as `{"found": false}` are successes; `is_error` is
/// reserved for calls that could not be carried out at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub content: Value,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: Value::String(message.into()),
            is_error: true,
        }
    }
}

/// A tool call dispatched by the runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "empty_object")]
    pub input: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// Tool definition for the hosted runtime
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Convert to the function-calling schema the runtime registers with the LLM
    pub fn to_function_schema(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "name": self.name,
            "description": self.description,
            "parameters": self.input_schema,
        })
    }
}

/// Deserialize tool input into a typed argument struct
pub fn parse_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T, eyre::Error> {
    serde_json::from_value(input)
        .map_err(|e| VoiceDeskError::InvalidInput(format!("invalid arguments for {}: {}", tool, e)).into())
}
