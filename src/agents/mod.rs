//! Voice agents
//!
//! Each agent bundles instructions, session settings for the hosted runtime,
//! and the tool set the LLM can call. Agents are independent: tools of one
//! agent share that agent's session state and nothing else.

pub mod fraud;
pub mod grocery;
pub mod sdr;
pub mod story;
pub mod tutor;

use std::fmt;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::config::{GlobalConfig, SessionConfig};
use crate::error::{Result, VoiceDeskError};
use crate::tools::{ToolCall, ToolContext, ToolExecutor, ToolResult};

/// The agents this crate ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Fraud,
    Sdr,
    Grocery,
    Tutor,
    Story,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::Fraud,
        AgentKind::Sdr,
        AgentKind::Grocery,
        AgentKind::Tutor,
        AgentKind::Story,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Fraud => "fraud",
            AgentKind::Sdr => "sdr",
            AgentKind::Grocery => "grocery",
            AgentKind::Tutor => "tutor",
            AgentKind::Story => "story",
        }
    }

    /// One-line description for listings
    pub fn summary(self) -> &'static str {
        match self {
            AgentKind::Fraud => "Bank fraud alert: verify the customer and record the transaction outcome",
            AgentKind::Sdr => "Sales rep: answer FAQ questions and capture leads",
            AgentKind::Grocery => "Grocery ordering: build a cart and place orders",
            AgentKind::Tutor => "Active recall tutor: learn, quiz and teach-back modes",
            AgentKind::Story => "Narrator for a fixed interactive radio drama",
        }
    }

    /// Build a fresh agent (with fresh session state) from config
    pub fn build(self, config: &GlobalConfig) -> Result<Agent> {
        match self {
            AgentKind::Fraud => fraud::agent(config),
            AgentKind::Sdr => sdr::agent(config),
            AgentKind::Grocery => grocery::agent(config),
            AgentKind::Tutor => tutor::agent(config),
            AgentKind::Story => story::agent(config),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = VoiceDeskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| VoiceDeskError::UnknownAgent(s.to_string()))
    }
}

/// A ready-to-run agent
pub struct Agent {
    pub kind: AgentKind,
    pub instructions: String,
    pub session: SessionConfig,
    pub executor: ToolExecutor,
}

impl Agent {
    pub fn new(kind: AgentKind, instructions: impl Into<String>, session: SessionConfig, executor: ToolExecutor) -> Self {
        Self {
            kind,
            instructions: instructions.into(),
            session,
            executor,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Run context for a new session with this agent
    pub fn context(&self) -> ToolContext {
        ToolContext::for_agent(self.name())
    }

    /// Dispatch one tool call
    pub async fn call(&self, call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        self.executor.execute(call, ctx).await
    }

    /// Description handed to the hosted runtime: instructions, session
    /// settings and tool schemas.
    pub fn manifest(&self) -> Value {
        let tools: Vec<_> = self
            .executor
            .definitions()
            .iter()
            .map(|d| d.to_function_schema())
            .collect();

        json!({
            "agent": self.name(),
            "instructions": self.instructions,
            "session": self.session,
            "tools": tools,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config(dir: &Path) -> GlobalConfig {
        let mut config = GlobalConfig::default();
        config.paths.fraud_db = dir.join("fraud_cases.json");
        config.paths.faq_file = dir.join("company_faq.json");
        config.paths.leads_file = dir.join("leads.json");
        config.paths.catalog_file = dir.join("catalog.json");
        config.paths.orders_dir = dir.join("orders");
        config.paths.tutor_content = dir.join("tutor_content.json");
        config
    }

    #[test]
    fn test_parse_agent_kind() {
        assert_eq!("fraud".parse::<AgentKind>().unwrap(), AgentKind::Fraud);
        assert_eq!(" SDR ".parse::<AgentKind>().unwrap(), AgentKind::Sdr);
        assert!(matches!("pirate".parse::<AgentKind>(), Err(VoiceDeskError::UnknownAgent(_))));
    }

    #[test]
    fn test_build_every_agent_with_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        for kind in AgentKind::ALL {
            let agent = kind.build(&config).unwrap();
            assert_eq!(agent.kind, kind);
            assert!(!agent.executor.tool_names().is_empty(), "{}", kind);
        }
    }

    #[test]
    fn test_manifest_lists_tools() {
        let dir = tempfile::tempdir().unwrap();
        let agent = AgentKind::Fraud.build(&config(dir.path())).unwrap();
        let manifest = agent.manifest();

        assert_eq!(manifest["agent"], "fraud");
        assert_eq!(manifest["session"]["stt-model"], "nova-3");
        let names: Vec<_> = manifest["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "get_transaction_summary",
                "load_fraud_case",
                "record_outcome",
                "update_fraud_case",
                "verify_answer"
            ]
        );
    }

    #[test]
    fn test_tutor_session_uses_learn_voice() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.tutor.voices.learn = "en-US-natalie".into();

        let agent = AgentKind::Tutor.build(&config).unwrap();
        assert_eq!(agent.session.tts_voice, "en-US-natalie");
    }
}
