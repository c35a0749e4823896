//! Tool execution context - scoped to a single voice session

use std::time::Instant;

use crate::id::generate_session_id;

/// Run context passed to every tool call in a session
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Agent the session belongs to
    pub agent: String,

    /// Session ID (hosted runtime room/job, or a generated one)
    pub session_id: String,

    started: Instant,
}

impl ToolContext {
    pub fn new(agent: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            session_id: session_id.into(),
            started: Instant::now(),
        }
    }

    /// Create a context with a generated session ID
    pub fn for_agent(agent: impl Into<String>) -> Self {
        let agent = agent.into();
        let session_id = generate_session_id(&agent);
        Self::new(agent, session_id)
    }

    /// Milliseconds since the session started
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}
