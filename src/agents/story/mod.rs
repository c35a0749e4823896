//! Story narrator agent
//!
//! Walks the player through a fixed movie script one scene at a time. The
//! player's spoken choices are acknowledged but never change the script.

mod script;
mod tools;

pub use script::{CLOSING_PHRASE, EPILOGUE, SCENES, Scene, TITLE, narrate, narrate_scene};
pub use tools::{ContinueStoryTool, StartStoryTool, StoryStateTool};

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::{Agent, AgentKind};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::tools::ToolExecutor;

pub const INSTRUCTIONS: &str = "You are the narrator of an interactive radio drama. \
Call start_story to begin, then read the narration you receive word for word, with atmosphere. \
After each scene wait for the listener to say what they do, and pass it to continue_story. \
The script is fixed: acknowledge the listener's choice, but never invent scenes of your own. \
When continue_story reports the story is finished, read the epilogue and say goodbye.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoryState {
    pub scene_index: usize,
    pub started: bool,
    pub finished: bool,
}

/// Session state shared by the story tools
pub struct StoryDesk {
    state: Mutex<StoryState>,
}

impl StoryDesk {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoryState::default()),
        }
    }

    pub async fn state(&self) -> StoryState {
        *self.state.lock().await
    }

    fn scene_body(index: usize, narration: String) -> Value {
        json!({
            "finished": false,
            "scene_number": index + 1,
            "scene_count": SCENES.len(),
            "title": SCENES[index].title,
            "narration": narration,
        })
    }

    /// Rewind to the first scene and narrate it.
    pub async fn start(&self) -> Value {
        *self.state.lock().await = StoryState {
            scene_index: 0,
            started: true,
            finished: false,
        };
        let mut body = Self::scene_body(0, narrate_scene(&SCENES[0], None));
        body["story"] = json!(TITLE);
        body
    }

    /// Advance one scene. Starts the story if it has not begun.
    pub async fn advance(&self, player_action: Option<&str>) -> Value {
        let mut state = self.state.lock().await;
        if !state.started {
            drop(state);
            return self.start().await;
        }
        if state.finished {
            return json!({"finished": true, "narration": EPILOGUE});
        }

        let next = state.scene_index + 1;
        if next >= SCENES.len() {
            state.finished = true;
            return json!({"finished": true, "narration": EPILOGUE});
        }

        state.scene_index = next;
        Self::scene_body(next, narrate_scene(&SCENES[next], player_action))
    }
}

impl Default for StoryDesk {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the story agent from config
pub fn agent(config: &GlobalConfig) -> Result<Agent> {
    let desk = Arc::new(StoryDesk::new());
    log::info!("Story agent ready: {} ({} scenes)", TITLE, SCENES.len());

    let executor = ToolExecutor::new()
        .with_tool(StartStoryTool::new(desk.clone()))
        .with_tool(ContinueStoryTool::new(desk.clone()))
        .with_tool(StoryStateTool::new(desk));

    Ok(Agent::new(AgentKind::Story, INSTRUCTIONS, config.session.clone(), executor))
}
