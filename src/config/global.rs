//! Global configuration.
//!
//! Loaded from ~/.config/voicedesk/voicedesk.yml or .voicedesk.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::VoiceDeskError;

/// Global configuration for voicedesk.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Data file locations.
    pub paths: PathsConfig,

    /// Settings handed to the hosted voice runtime.
    pub session: SessionConfig,

    /// Tutor agent settings.
    pub tutor: TutorConfig,
}

impl GlobalConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .voicedesk.yml in current directory
    /// 3. ~/.config/voicedesk/voicedesk.yml
    /// 4. Defaults
    ///
    /// Environment overrides are applied by the caller (see `config::load_config`).
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(".voicedesk.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .voicedesk.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .voicedesk.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("voicedesk").join("voicedesk.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        let invalid = |msg: String| Err(VoiceDeskError::Config(msg));

        for (key, path) in self.paths.entries() {
            if path.as_os_str().is_empty() {
                return invalid(format!("paths.{} must not be empty", key));
            }
        }
        if self.session.llm_model.trim().is_empty() {
            return invalid("session.llm-model must not be empty".to_string());
        }
        if self.session.min_sentence_len == 0 {
            return invalid("session.min-sentence-len must be > 0".to_string());
        }
        Ok(())
    }
}

/// Data file locations. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Fraud case database (object keyed by username).
    #[serde(rename = "fraud-db")]
    pub fraud_db: PathBuf,

    /// Company FAQ file.
    #[serde(rename = "faq-file")]
    pub faq_file: PathBuf,

    /// Captured leads (JSON array).
    #[serde(rename = "leads-file")]
    pub leads_file: PathBuf,

    /// Grocery catalog.
    #[serde(rename = "catalog-file")]
    pub catalog_file: PathBuf,

    /// Directory receiving placed orders.
    #[serde(rename = "orders-dir")]
    pub orders_dir: PathBuf,

    /// Tutor topics.
    #[serde(rename = "tutor-content")]
    pub tutor_content: PathBuf,
}

impl PathsConfig {
    /// Config key and value of every path, for validation and display.
    pub fn entries(&self) -> [(&'static str, &Path); 6] {
        [
            ("fraud-db", &self.fraud_db),
            ("faq-file", &self.faq_file),
            ("leads-file", &self.leads_file),
            ("catalog-file", &self.catalog_file),
            ("orders-dir", &self.orders_dir),
            ("tutor-content", &self.tutor_content),
        ]
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            fraud_db: PathBuf::from("fraud_cases.json"),
            faq_file: PathBuf::from("company_faq.json"),
            leads_file: PathBuf::from("leads.json"),
            catalog_file: PathBuf::from("catalog.json"),
            orders_dir: PathBuf::from("orders"),
            tutor_content: PathBuf::from("tutor_content.json"),
        }
    }
}

/// Settings for the hosted session (speech, LLM, turn detection).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    /// Speech-to-text model.
    pub stt_model: String,

    /// LLM backend model.
    pub llm_model: String,

    /// Default TTS voice.
    pub tts_voice: String,

    /// TTS speaking style.
    pub tts_style: String,

    /// Minimum sentence length for the TTS sentence tokenizer.
    pub min_sentence_len: u32,

    /// Let the TTS pace text as it streams.
    pub text_pacing: bool,

    /// Turn detection model.
    pub turn_detection: String,

    /// Start LLM generation before end of turn is confirmed.
    pub preemptive_generation: bool,

    /// Enable background voice cancellation on room input.
    pub noise_cancellation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stt_model: "nova-3".to_string(),
            llm_model: "gemini-2.5-flash".to_string(),
            tts_voice: "en-US-matthew".to_string(),
            tts_style: "Conversation".to_string(),
            min_sentence_len: 2,
            text_pacing: true,
            turn_detection: "multilingual".to_string(),
            preemptive_generation: true,
            noise_cancellation: true,
        }
    }
}

/// Tutor agent settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TutorConfig {
    /// TTS voice per tutoring mode.
    pub voices: TutorVoices,
}

/// TTS voice per tutoring mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TutorVoices {
    pub learn: String,
    pub quiz: String,
    pub teach_back: String,
}

impl Default for TutorVoices {
    fn default() -> Self {
        Self {
            learn: "en-US-matthew".to_string(),
            quiz: "en-US-alicia".to_string(),
            teach_back: "en-US-ken".to_string(),
        }
    }
}
