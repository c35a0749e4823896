//! Configuration system for voicedesk.
//!
//! Two layers:
//! 1. YAML config (explicit path, .voicedesk.yml, ~/.config/voicedesk/voicedesk.yml)
//! 2. Environment overrides for data file paths (FRAUD_DB, FAQ_FILE, ...)

use eyre::Result;
use std::path::PathBuf;

pub use self::global::{GlobalConfig, PathsConfig, SessionConfig, TutorConfig, TutorVoices};

pub mod env;
mod global;

/// Load configuration from the standard search paths, then apply `.env.local`
/// and process environment overrides.
pub fn load_config(explicit_path: Option<&PathBuf>) -> Result<GlobalConfig> {
    env::load_dotenv();
    let mut config = GlobalConfig::load(explicit_path)?;
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voicedesk.yml");
        std::fs::write(&path, "session:\n  tts-voice: en-US-natalie\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.session.tts_voice, "en-US-natalie");
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voicedesk.yml");
        std::fs::write(&path, "session:\n  llm-model: \"\"\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }
}
