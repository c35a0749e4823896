//! Active recall tutor agent
//!
//! Tracks which topic the learner picked and whether the tutor is explaining
//! (learn), asking (quiz) or listening to the learner explain (teach_back).
//! Each mode has its own TTS voice so the learner can hear the switch.

mod content;
mod tools;

pub use content::{Topic, TutorMode, TutorState, load_topics};
pub use tools::{GetActivityTool, GetStateTool, ListTopicsTool, SelectTopicTool, SetModeTool};

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{Agent, AgentKind};
use crate::config::{GlobalConfig, TutorVoices};
use crate::error::Result;
use crate::tools::ToolExecutor;

pub const INSTRUCTIONS: &str = "You are an active recall coach. \
Greet the learner, offer the available topics from list_topics and ask which one they want. \
Select it with select_topic, then ask which mode they prefer: learn (you explain), \
quiz (you ask questions) or teach_back (they explain it to you). Switch with set_mode whenever \
they ask. Use get_activity to get the material for the current mode and stay within it. \
In teach_back mode, give short, encouraging feedback on what they got right and what they missed.";

/// Session state shared by the tutor tools
pub struct TutorDesk {
    topics: Vec<Topic>,
    voices: TutorVoices,
    state: Mutex<TutorState>,
}

impl TutorDesk {
    pub fn new(topics: Vec<Topic>, voices: TutorVoices) -> Self {
        Self {
            topics,
            voices,
            state: Mutex::new(TutorState::default()),
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn voices(&self) -> &TutorVoices {
        &self.voices
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        let wanted = id.trim().to_lowercase();
        self.topics.iter().find(|t| t.id.to_lowercase() == wanted)
    }

    pub async fn state(&self) -> TutorState {
        self.state.lock().await.clone()
    }

    pub async fn select(&self, topic: Topic) -> TutorState {
        let mut state = self.state.lock().await;
        state.topic_id = Some(topic.id.clone());
        state.topic_data = Some(topic);
        state.clone()
    }

    pub async fn set_mode(&self, mode: TutorMode) -> TutorState {
        let mut state = self.state.lock().await;
        state.mode = mode;
        state.clone()
    }
}

/// Build the tutor agent from config
pub fn agent(config: &GlobalConfig) -> Result<Agent> {
    let topics = load_topics(&config.paths.tutor_content)?;
    log::info!(
        "Tutor agent loaded {} topics from {}",
        topics.len(),
        config.paths.tutor_content.display()
    );
    let desk = Arc::new(TutorDesk::new(topics, config.tutor.voices.clone()));

    let mut session = config.session.clone();
    session.tts_voice = TutorMode::default().voice(desk.voices()).to_string();

    let executor = ToolExecutor::new()
        .with_tool(ListTopicsTool::new(desk.clone()))
        .with_tool(SelectTopicTool::new(desk.clone()))
        .with_tool(SetModeTool::new(desk.clone()))
        .with_tool(GetActivityTool::new(desk.clone()))
        .with_tool(GetStateTool::new(desk));

    Ok(Agent::new(AgentKind::Tutor, INSTRUCTIONS, session, executor))
}
