//! Tutor agent tools

use std::sync::Arc;

use async_trait::async_trait;
use eyre::eyre;
use serde_json::{Value, json};

use super::{TutorDesk, TutorMode};
use crate::tools::{Tool, ToolContext, ToolResult};

pub struct ListTopicsTool {
    desk: Arc<TutorDesk>,
}

impl ListTopicsTool {
    pub fn new(desk: Arc<TutorDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for ListTopicsTool {
    fn name(&self) -> &'static str {
        "list_topics"
    }

    fn description(&self) -> &'static str {
        "List the topics available for this session."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let topics: Vec<_> = self
            .desk
            .topics()
            .iter()
            .map(|t| json!({"id": t.id, "title": t.title}))
            .collect();
        Ok(ToolResult::success(json!({"topics": topics})))
    }
}

pub struct SelectTopicTool {
    desk: Arc<TutorDesk>,
}

impl SelectTopicTool {
    pub fn new(desk: Arc<TutorDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for SelectTopicTool {
    fn name(&self) -> &'static str {
        "select_topic"
    }

    fn description(&self) -> &'static str {
        "Select the topic to study by its id."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic_id": {"type": "string", "description": "Topic id from list_topics"}
            },
            "required": ["topic_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let topic_id = input["topic_id"].as_str().ok_or_else(|| eyre!("topic_id is required"))?;

        let Some(topic) = self.desk.topic(topic_id).cloned() else {
            return Ok(ToolResult::success(json!({
                "status": "error",
                "message": "topic_not_found",
                "topic_id": topic_id,
            })));
        };

        let state = self.desk.select(topic).await;
        log::info!("[{}] Topic -> {:?} (mode={})", ctx.session_id, state.topic_id, state.mode);
        Ok(ToolResult::success(json!({"status": "ok", "state": state})))
    }
}

pub struct SetModeTool {
    desk: Arc<TutorDesk>,
}

impl SetModeTool {
    pub fn new(desk: Arc<TutorDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for SetModeTool {
    fn name(&self) -> &'static str {
        "set_mode"
    }

    fn description(&self) -> &'static str {
        "Switch between learn, quiz and teach_back. Returns the voice to use for the new mode."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "mode": {"type": "string", "enum": ["learn", "quiz", "teach_back"]}
            },
            "required": ["mode"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let raw = input["mode"].as_str().ok_or_else(|| eyre!("mode is required"))?;

        let Some(mode) = TutorMode::parse(raw) else {
            return Ok(ToolResult::success(json!({
                "status": "error",
                "message": "invalid_mode",
                "mode": raw,
            })));
        };

        let state = self.desk.set_mode(mode).await;
        let voice = mode.voice(self.desk.voices());
        log::info!("[{}] Mode -> {} (voice={})", ctx.session_id, mode, voice);
        Ok(ToolResult::success(json!({"status": "ok", "state": state, "voice": voice})))
    }
}

pub struct GetActivityTool {
    desk: Arc<TutorDesk>,
}

impl GetActivityTool {
    pub fn new(desk: Arc<TutorDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for GetActivityTool {
    fn name(&self) -> &'static str {
        "get_activity"
    }

    fn description(&self) -> &'static str {
        "Get the material for the selected topic in the current mode."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let content = self
            .desk
            .state()
            .await
            .activity()
            .unwrap_or_else(|| json!({"error": "no_topic_selected"}));
        Ok(ToolResult::success(content))
    }
}

pub struct GetStateTool {
    desk: Arc<TutorDesk>,
}

impl GetStateTool {
    pub fn new(desk: Arc<TutorDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for GetStateTool {
    fn name(&self) -> &'static str {
        "get_state"
    }

    fn description(&self) -> &'static str {
        "Get the current topic and mode."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        Ok(ToolResult::success(serde_json::to_value(self.desk.state().await)?))
    }
}
