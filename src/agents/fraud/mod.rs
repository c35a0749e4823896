//! Fraud alert agent
//!
//! Calls a customer about a suspicious card transaction, verifies them with
//! the security question stored on the case, and records whether the
//! transaction was theirs. Cases live in a JSON object keyed by username.

mod case;
mod tools;

pub use case::{Decision, FraudCase, FraudStatus};
pub use tools::{LoadFraudCaseTool, RecordOutcomeTool, TransactionSummaryTool, UpdateFraudCaseTool, VerifyAnswerTool};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use super::{Agent, AgentKind};
use crate::config::GlobalConfig;
use crate::error::{Result, VoiceDeskError};
use crate::store;
use crate::tools::ToolExecutor;

pub const INSTRUCTIONS: &str = "You are a fraud alert representative for a fictional bank. \
At the start of the call ask for the customer's username and load their case with load_fraud_case. \
Verify the customer only with the security question stored on the case, using verify_answer. \
Once verified, read out the merchant, amount, masked card ending, time and location using \
get_transaction_summary, then ask whether they made the transaction. \
If they did, record the outcome 'safe'. If they did not, record 'fraud' and tell them the card \
has been blocked and a dispute opened (mock actions). If verification fails, record \
'verification_failed' and end the call politely. Persist the outcome with record_outcome or \
update_fraud_case. Never ask for full card numbers, PINs, OTPs or passwords.";

/// Session state shared by the fraud tools
pub struct FraudDesk {
    db_path: PathBuf,
    current: Mutex<Option<FraudCase>>,
}

impl FraudDesk {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            current: Mutex::new(None),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn load_db(&self) -> Result<BTreeMap<String, Value>> {
        store::load_or_init(&self.db_path)
    }

    /// Look up a case by username. Creates an empty DB if none exists.
    pub fn lookup(&self, username: &str) -> Result<Option<FraudCase>> {
        let db = self.load_db()?;
        match db.get(username) {
            Some(entry) => {
                let mut case: FraudCase = serde_json::from_value(entry.clone()).map_err(|e| {
                    VoiceDeskError::Storage(format!("Malformed case for {} in {}: {}", username, self.db_path.display(), e))
                })?;
                if case.user_name.trim().is_empty() {
                    case.user_name = username.to_string();
                }
                Ok(Some(case))
            }
            None => Ok(None),
        }
    }

    /// Replace the case for its user and rewrite the whole DB file.
    pub fn persist(&self, case: &FraudCase) -> Result<()> {
        let mut db = self.load_db()?;
        db.insert(case.user_name.clone(), serde_json::to_value(case)?);
        store::save_json(&self.db_path, &db)
    }

    /// Case loaded in this session, if any
    pub async fn current(&self) -> Option<FraudCase> {
        self.current.lock().await.clone()
    }

    pub async fn set_current(&self, case: FraudCase) {
        *self.current.lock().await = Some(case);
    }
}

/// Build the fraud agent from config
pub fn agent(config: &GlobalConfig) -> Result<Agent> {
    let desk = Arc::new(FraudDesk::new(&config.paths.fraud_db));
    log::info!("Fraud agent using case DB {}", desk.db_path().display());

    let executor = ToolExecutor::new()
        .with_tool(LoadFraudCaseTool::new(desk.clone()))
        .with_tool(VerifyAnswerTool::new(desk.clone()))
        .with_tool(TransactionSummaryTool::new(desk.clone()))
        .with_tool(UpdateFraudCaseTool::new(desk.clone()))
        .with_tool(RecordOutcomeTool::new(desk));

    Ok(Agent::new(AgentKind::Fraud, INSTRUCTIONS, config.session.clone(), executor))
}
