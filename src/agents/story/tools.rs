//! Story agent tools

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::StoryDesk;
use crate::tools::{Tool, ToolContext, ToolResult};

pub struct StartStoryTool {
    desk: Arc<StoryDesk>,
}

impl StartStoryTool {
    pub fn new(desk: Arc<StoryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for StartStoryTool {
    fn name(&self) -> &'static str {
        "start_story"
    }

    fn description(&self) -> &'static str {
        "Start (or restart) the story from the first scene."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        log::info!("[{}] Story started", ctx.session_id);
        Ok(ToolResult::success(self.desk.start().await))
    }
}

pub struct ContinueStoryTool {
    desk: Arc<StoryDesk>,
}

impl ContinueStoryTool {
    pub fn new(desk: Arc<StoryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for ContinueStoryTool {
    fn name(&self) -> &'static str {
        "continue_story"
    }

    fn description(&self) -> &'static str {
        "Move to the next scene, acknowledging what the listener chose to do."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "player_action": {
                    "type": "string",
                    "description": "What the listener said they do"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let action = input["player_action"].as_str();
        let body = self.desk.advance(action).await;
        log::info!("[{}] Story -> scene {} (finished={})", ctx.session_id, body["scene_number"], body["finished"]);
        Ok(ToolResult::success(body))
    }
}

pub struct StoryStateTool {
    desk: Arc<StoryDesk>,
}

impl StoryStateTool {
    pub fn new(desk: Arc<StoryDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for StoryStateTool {
    fn name(&self) -> &'static str {
        "get_story_state"
    }

    fn description(&self) -> &'static str {
        "Where the listener is in the story."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        Ok(ToolResult::success(serde_json::to_value(self.desk.state().await)?))
    }
}
