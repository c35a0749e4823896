//! Fraud agent tools

use std::sync::Arc;

use async_trait::async_trait;
use eyre::eyre;
use serde_json::{Value, json};

use super::{Decision, FraudCase, FraudDesk};
use crate::tools::{Tool, ToolContext, ToolResult};

fn no_case_loaded() -> ToolResult {
    ToolResult::success(json!({"error": "no_case_loaded"}))
}

pub struct LoadFraudCaseTool {
    desk: Arc<FraudDesk>,
}

impl LoadFraudCaseTool {
    pub fn new(desk: Arc<FraudDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for LoadFraudCaseTool {
    fn name(&self) -> &'static str {
        "load_fraud_case"
    }

    fn description(&self) -> &'static str {
        "Load the pending fraud case for a customer by username."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "Customer username as spoken by the caller"
                }
            },
            "required": ["username"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let username = input["username"].as_str().ok_or_else(|| eyre!("username is required"))?;

        let Some(case) = self.desk.lookup(username.trim())? else {
            log::info!("[{}] No case found for username={}", ctx.session_id, username);
            return Ok(ToolResult::success(json!({"found": false})));
        };

        log::info!(
            "[{}] Loaded case for {} (merchant={:?} amount={:?})",
            ctx.session_id,
            case.user_name,
            case.transaction_name,
            case.transaction_amount
        );
        let body = json!({"found": true, "case": case});
        self.desk.set_current(case).await;
        Ok(ToolResult::success(body))
    }
}

pub struct VerifyAnswerTool {
    desk: Arc<FraudDesk>,
}

impl VerifyAnswerTool {
    pub fn new(desk: Arc<FraudDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for VerifyAnswerTool {
    fn name(&self) -> &'static str {
        "verify_answer"
    }

    fn description(&self) -> &'static str {
        "Check the customer's answer to the security question on the loaded case."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "answer": {
                    "type": "string",
                    "description": "The customer's spoken answer"
                }
            },
            "required": ["answer"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        // A null or missing answer is treated as an empty one
        let answer = input["answer"].as_str().unwrap_or("");

        let Some(case) = self.desk.current().await else {
            return Ok(ToolResult::success(json!({"error": "no_case_loaded", "verified": false})));
        };

        let verified = case.verify(answer);
        log::info!("[{}] Verification for {} => {}", ctx.session_id, case.user_name, verified);
        Ok(ToolResult::success(json!({"verified": verified})))
    }
}

pub struct TransactionSummaryTool {
    desk: Arc<FraudDesk>,
}

impl TransactionSummaryTool {
    pub fn new(desk: Arc<FraudDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for TransactionSummaryTool {
    fn name(&self) -> &'static str {
        "get_transaction_summary"
    }

    fn description(&self) -> &'static str {
        "Summarize the suspicious transaction on the loaded case."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        match self.desk.current().await {
            Some(case) => Ok(ToolResult::success(json!({"summary": case.summary(), "case": case}))),
            None => Ok(no_case_loaded()),
        }
    }
}

pub struct UpdateFraudCaseTool {
    desk: Arc<FraudDesk>,
}

impl UpdateFraudCaseTool {
    pub fn new(desk: Arc<FraudDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for UpdateFraudCaseTool {
    fn name(&self) -> &'static str {
        "update_fraud_case"
    }

    fn description(&self) -> &'static str {
        "Save the full updated case (including status and outcomeNote) to the case database."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "updated_case": {
                    "type": "object",
                    "description": "The complete case object; userName is required"
                }
            },
            "required": ["updated_case"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let invalid = || ToolResult::success(json!({"status": "error", "message": "invalid_case"}));

        let updated = &input["updated_case"];
        let has_user = match &updated["userName"] {
            Value::String(u) => !u.trim().is_empty(),
            Value::Number(_) => true,
            _ => false,
        };
        if !updated.is_object() || !has_user {
            return Ok(invalid());
        }
        let Ok(case) = serde_json::from_value::<FraudCase>(updated.clone()) else {
            return Ok(invalid());
        };

        self.desk.persist(&case)?;
        log::info!("[{}] Updated case for {} -> status={}", ctx.session_id, case.user_name, case.status);

        let body = json!({"status": "ok", "saved": case});
        self.desk.set_current(case).await;
        Ok(ToolResult::success(body))
    }
}

pub struct RecordOutcomeTool {
    desk: Arc<FraudDesk>,
}

impl RecordOutcomeTool {
    pub fn new(desk: Arc<FraudDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for RecordOutcomeTool {
    fn name(&self) -> &'static str {
        "record_outcome"
    }

    fn description(&self) -> &'static str {
        "Set the loaded case's status from the call outcome and save it. \
         decision is 'safe', 'fraud' or 'verification_failed'."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "decision": {
                    "type": "string",
                    "enum": ["safe", "fraud", "verification_failed"]
                },
                "note": {
                    "type": "string",
                    "description": "Optional outcome note; a standard note is used when omitted"
                }
            },
            "required": ["decision"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let decision = input["decision"].as_str().ok_or_else(|| eyre!("decision is required"))?;
        let note = input["note"].as_str();

        let Some(current) = self.desk.current().await else {
            return Ok(no_case_loaded());
        };

        let case = current.with_outcome(Decision::parse(decision), note);
        self.desk.persist(&case)?;
        log::info!("[{}] Recorded outcome for {} -> status={}", ctx.session_id, case.user_name, case.status);

        let body = json!({"status": "ok", "saved": case});
        self.desk.set_current(case).await;
        Ok(ToolResult::success(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::fraud::FraudStatus;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_db(path: &Path) {
        let db = json!({
            "john": {
                "userName": "john",
                "securityIdentifier": "12345",
                "securityQuestion": "What is your favorite color?",
                "securityAnswer": "blue",
                "cardEnding": "4242",
                "transactionAmount": "₹2,499",
                "transactionName": "ABC Industry",
                "transactionTime": "2025-11-25 18:42",
                "transactionLocation": "Mumbai",
                "transactionCategory": "e-commerce",
                "transactionSource": "alibaba.com",
                "status": "pending_review",
                "outcomeNote": ""
            }
        });
        fs::write(path, serde_json::to_string_pretty(&db).unwrap()).unwrap();
    }

    fn read_db(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn ctx() -> ToolContext {
        ToolContext::new("fraud", "test")
    }

    #[tokio::test]
    async fn test_load_unknown_user() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fraud_cases.json");
        write_db(&path);
        let desk = Arc::new(FraudDesk::new(&path));

        let result = LoadFraudCaseTool::new(desk.clone())
            .execute(json!({"username": "mary"}), &ctx())
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.content, json!({"found": false}));
        assert!(desk.current().await.is_none());
    }

    #[tokio::test]
    async fn test_load_creates_missing_db() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fraud_cases.json");
        let desk = Arc::new(FraudDesk::new(&path));

        let result = LoadFraudCaseTool::new(desk)
            .execute(json!({"username": "john"}), &ctx())
            .await
            .unwrap();

        assert_eq!(result.content["found"], false);
        assert_eq!(read_db(&path), json!({}));
    }

    #[tokio::test]
    async fn test_load_missing_username_is_error() {
        let dir = tempdir().unwrap();
        let desk = Arc::new(FraudDesk::new(dir.path().join("db.json")));

        let result = LoadFraudCaseTool::new(desk).execute(json!({}), &ctx()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_tools_without_case() {
        let dir = tempdir().unwrap();
        let desk = Arc::new(FraudDesk::new(dir.path().join("db.json")));

        let verify = VerifyAnswerTool::new(desk.clone())
            .execute(json!({"answer": "blue"}), &ctx())
            .await
            .unwrap();
        assert_eq!(verify.content, json!({"error": "no_case_loaded", "verified": false}));

        let summary = TransactionSummaryTool::new(desk.clone())
            .execute(json!({}), &ctx())
            .await
            .unwrap();
        assert_eq!(summary.content, json!({"error": "no_case_loaded"}));

        let outcome = RecordOutcomeTool::new(desk)
            .execute(json!({"decision": "safe"}), &ctx())
            .await
            .unwrap();
        assert_eq!(outcome.content, json!({"error": "no_case_loaded"}));
    }

    #[tokio::test]
    async fn test_load_verify_and_summarize() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fraud_cases.json");
        write_db(&path);
        let desk = Arc::new(FraudDesk::new(&path));

        let loaded = LoadFraudCaseTool::new(desk.clone())
            .execute(json!({"username": "john"}), &ctx())
            .await
            .unwrap();
        assert_eq!(loaded.content["found"], true);
        assert_eq!(loaded.content["case"]["userName"], "john");

        let summary = TransactionSummaryTool::new(desk.clone())
            .execute(json!({}), &ctx())
            .await
            .unwrap();
        assert!(summary.content["summary"].as_str().unwrap().contains("ABC Industry"));

        let verify = VerifyAnswerTool::new(desk.clone());
        let ok = verify.execute(json!({"answer": " Blue "}), &ctx()).await.unwrap();
        assert_eq!(ok.content, json!({"verified": true}));
        let bad = verify.execute(json!({"answer": "red"}), &ctx()).await.unwrap();
        assert_eq!(bad.content, json!({"verified": false}));
        let null = verify.execute(json!({"answer": null}), &ctx()).await.unwrap();
        assert_eq!(null.content, json!({"verified": false}));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_case() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fraud_cases.json");
        write_db(&path);
        let tool = UpdateFraudCaseTool::new(Arc::new(FraudDesk::new(&path)));
        let invalid = json!({"status": "error", "message": "invalid_case"});

        for input in [
            json!({}),
            json!({"updated_case": "john"}),
            json!({"updated_case": {"status": "confirmed_safe"}}),
            json!({"updated_case": {"userName": "  "}}),
            json!({"updated_case": {"userName": "john", "status": "maybe"}}),
        ] {
            let result = tool.execute(input, &ctx()).await.unwrap();
            assert_eq!(result.content, invalid);
        }

        assert_eq!(read_db(&path)["john"]["status"], "pending_review");
    }

    #[tokio::test]
    async fn test_update_persists_status() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fraud_cases.json");
        write_db(&path);
        let desk = Arc::new(FraudDesk::new(&path));

        LoadFraudCaseTool::new(desk.clone())
            .execute(json!({"username": "john"}), &ctx())
            .await
            .unwrap();
        let mut case = desk.current().await.unwrap().with_outcome(Decision::Fraud, None);
        case.outcome_note = "User denied transaction; mock action taken.".into();

        let result = UpdateFraudCaseTool::new(desk.clone())
            .execute(json!({"updated_case": case}), &ctx())
            .await
            .unwrap();
        assert_eq!(result.content["status"], "ok");

        let db = read_db(&path);
        assert_eq!(db["john"]["status"], "confirmed_fraud");
        assert_eq!(db["john"]["outcomeNote"], "User denied transaction; mock action taken.");
        assert_eq!(desk.current().await.unwrap().status, FraudStatus::ConfirmedFraud);
    }

    #[tokio::test]
    async fn test_record_outcome_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fraud_cases.json");
        write_db(&path);
        let desk = Arc::new(FraudDesk::new(&path));

        LoadFraudCaseTool::new(desk.clone())
            .execute(json!({"username": "john"}), &ctx())
            .await
            .unwrap();
        let result = RecordOutcomeTool::new(desk)
            .execute(json!({"decision": "safe"}), &ctx())
            .await
            .unwrap();

        assert_eq!(result.content["saved"]["status"], "confirmed_safe");
        let db = read_db(&path);
        assert_eq!(db["john"]["status"], "confirmed_safe");
        assert_eq!(db["john"]["outcomeNote"], "Customer confirmed transaction as legitimate.");
        assert_eq!(db["john"]["transactionAmount"], "₹2,499");
    }

    #[tokio::test]
    async fn test_loosely_typed_case_loads_and_updates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fraud_cases.json");
        let db = json!({
            "john": {
                "userName": "john",
                "securityIdentifier": 12345,
                "securityAnswer": "blue",
                "cardEnding": 4242,
                "transactionAmount": 2499,
                "transactionName": null,
                "status": null,
                "outcomeNote": null
            }
        });
        fs::write(&path, serde_json::to_string_pretty(&db).unwrap()).unwrap();
        let desk = Arc::new(FraudDesk::new(&path));

        let loaded = LoadFraudCaseTool::new(desk.clone())
            .execute(json!({"username": "john"}), &ctx())
            .await
            .unwrap();
        assert!(!loaded.is_error);
        assert_eq!(loaded.content["found"], true);
        assert_eq!(loaded.content["case"]["cardEnding"], 4242);

        let summary = TransactionSummaryTool::new(desk.clone())
            .execute(json!({}), &ctx())
            .await
            .unwrap();
        let summary = summary.content["summary"].as_str().unwrap().to_string();
        assert!(summary.starts_with("Transaction at UNKNOWN for 2499. Card ending: 4242."));

        let mut updated = loaded.content["case"].clone();
        updated["status"] = json!("confirmed_safe");
        let result = UpdateFraudCaseTool::new(desk)
            .execute(json!({"updated_case": updated}), &ctx())
            .await
            .unwrap();
        assert_eq!(result.content["status"], "ok");

        let db = read_db(&path);
        assert_eq!(db["john"]["status"], "confirmed_safe");
        assert_eq!(db["john"]["securityIdentifier"], 12345);
        assert!(db["john"]["transactionName"].is_null());
        assert!(db["john"].as_object().unwrap().contains_key("transactionName"));
    }
}
