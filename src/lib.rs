//! voicedesk - domain tool sets for hosted real-time voice agents
//!
//! The hosted runtime owns audio, speech recognition, the LLM and speech
//! synthesis. This crate supplies what each demo agent brings to it:
//! instructions, session settings, and the tools the LLM may call, with
//! their small JSON files on disk.

pub mod agents;
pub mod config;
pub mod error;
pub mod id;
pub mod session;
pub mod store;
pub mod tools;

pub use agents::{Agent, AgentKind};
pub use error::{Result, VoiceDeskError};
