//! Tutor topics, modes and session state.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::TutorVoices;
use crate::error::Result;
use crate::store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub sample_question: String,
}

/// Load tutor topics; a missing file yields no topics.
pub fn load_topics(path: &Path) -> Result<Vec<Topic>> {
    store::load_or_default(path, "Tutor content")
}

/// How the tutor is working with the learner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorMode {
    /// Tutor explains the topic
    #[default]
    Learn,
    /// Tutor asks questions
    Quiz,
    /// Learner explains the topic back
    TeachBack,
}

impl TutorMode {
    pub const ALL: [TutorMode; 3] = [TutorMode::Learn, TutorMode::Quiz, TutorMode::TeachBack];

    pub fn as_str(self) -> &'static str {
        match self {
            TutorMode::Learn => "learn",
            TutorMode::Quiz => "quiz",
            TutorMode::TeachBack => "teach_back",
        }
    }

    /// Accepts "teach_back", "teach back" and "teach-back".
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|m| m.as_str() == normalized)
    }

    pub fn voice(self, voices: &TutorVoices) -> &str {
        match self {
            TutorMode::Learn => &voices.learn,
            TutorMode::Quiz => &voices.quiz,
            TutorMode::TeachBack => &voices.teach_back,
        }
    }
}

impl fmt::Display for TutorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TutorState {
    pub topic_id: Option<String>,
    pub topic_data: Option<Topic>,
    pub mode: TutorMode,
}

impl TutorState {
    /// What the tutor should do next for the selected topic and mode.
    pub fn activity(&self) -> Option<Value> {
        let topic = self.topic_data.as_ref()?;
        let activity = match self.mode {
            TutorMode::Learn => json!({
                "mode": self.mode,
                "topic": topic.title,
                "explain": topic.summary,
            }),
            TutorMode::Quiz => json!({
                "mode": self.mode,
                "topic": topic.title,
                "question": topic.sample_question,
            }),
            TutorMode::TeachBack => json!({
                "mode": self.mode,
                "topic": topic.title,
                "prompt": format!("Explain {} back to me in your own words.", topic.title),
                "reference": topic.summary,
            }),
        };
        Some(activity)
    }
}
