//! Fraud case records and outcome rules.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Review status of a fraud case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudStatus {
    #[default]
    PendingReview,
    ConfirmedSafe,
    ConfirmedFraud,
    VerificationFailed,
}

impl fmt::Display for FraudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FraudStatus::PendingReview => "pending_review",
            FraudStatus::ConfirmedSafe => "confirmed_safe",
            FraudStatus::ConfirmedFraud => "confirmed_fraud",
            FraudStatus::VerificationFailed => "verification_failed",
        };
        f.write_str(s)
    }
}

/// What the customer told us about the transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Customer made the transaction
    Safe,
    /// Customer did not make the transaction
    Fraud,
    /// Customer could not be verified
    VerificationFailed,
}

impl Decision {
    /// Anything other than "safe" or "fraud" counts as a failed verification.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "safe" => Decision::Safe,
            "fraud" => Decision::Fraud,
            _ => Decision::VerificationFailed,
        }
    }

    pub fn status(self) -> FraudStatus {
        match self {
            Decision::Safe => FraudStatus::ConfirmedSafe,
            Decision::Fraud => FraudStatus::ConfirmedFraud,
            Decision::VerificationFailed => FraudStatus::VerificationFailed,
        }
    }

    pub fn default_note(self) -> &'static str {
        match self {
            Decision::Safe => "Customer confirmed transaction as legitimate.",
            Decision::Fraud => "Customer denied transaction. Card blocked and dispute opened (mock).",
            Decision::VerificationFailed => "Verification failed; could not proceed.",
        }
    }
}

/// One suspicious transaction awaiting customer review.
///
/// Cases come from the bank's seed data and from the LLM, so descriptive
/// fields take any JSON value. A key present as `null` is written back as
/// `null`; an absent key stays absent. Keys we do not model are kept in
/// `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudCase {
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_name: String,
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub security_identifier: Option<Value>,
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub security_question: Option<Value>,
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub security_answer: Option<Value>,
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub card_ending: Option<Value>,
    /// Display amount, usually a preformatted string such as "₹2,499"
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub transaction_amount: Option<Value>,
    /// Merchant name
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub transaction_name: Option<Value>,
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub transaction_time: Option<Value>,
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub transaction_location: Option<Value>,
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub transaction_category: Option<Value>,
    #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
    pub transaction_source: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: FraudStatus,
    #[serde(default, deserialize_with = "lenient_string")]
    pub outcome_note: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Present keys keep their value, `null` included
fn keep_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings as-is, `null` as empty, anything else printed as JSON
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Readable text of a loosely typed field; blanks and non-scalars give `None`.
fn text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

impl FraudCase {
    /// Compare a spoken answer with the stored security answer.
    ///
    /// Both sides are trimmed and lowercased; an empty stored answer never verifies.
    pub fn verify(&self, answer: &str) -> bool {
        let expected = text(&self.security_answer).unwrap_or_default().trim().to_lowercase();
        let given = answer.trim().to_lowercase();
        !expected.is_empty() && given == expected
    }

    /// One-paragraph description of the transaction for the agent to read out.
    pub fn summary(&self) -> String {
        let or = |value: &Option<Value>, fallback: &str| text(value).unwrap_or_else(|| fallback.to_string());

        format!(
            "Transaction at {} for {}. Card ending: {}. Time: {}. Location: {}. Category: {}.",
            or(&self.transaction_name, "UNKNOWN"),
            or(&self.transaction_amount, "an amount"),
            or(&self.card_ending, "XXXX"),
            or(&self.transaction_time, "unknown"),
            or(&self.transaction_location, "unknown"),
            or(&self.transaction_category, "unknown"),
        )
    }

    /// Copy of this case carrying the outcome of the call.
    pub fn with_outcome(&self, decision: Decision, note: Option<&str>) -> FraudCase {
        let mut case = self.clone();
        case.status = decision.status();
        case.outcome_note = note
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(decision.default_note())
            .to_string();
        case
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> FraudCase {
        serde_json::from_value(json!({
            "userName": "john",
            "securityQuestion": "What is your favorite color?",
            "securityAnswer": "Blue ",
            "cardEnding": "4242",
            "transactionAmount": "₹2,499",
            "transactionName": "ABC Industry",
            "transactionTime": "2025-11-25 18:42",
            "transactionLocation": "Mumbai",
            "transactionCategory": "e-commerce",
            "transactionSource": "alibaba.com",
            "status": "pending_review",
            "outcomeNote": "",
            "branchCode": "MUM-07"
        }))
        .unwrap()
    }

    #[test]
    fn test_verify_trims_and_lowercases() {
        let case = sample();
        assert!(case.verify("blue"));
        assert!(case.verify("  BLUE"));
        assert!(!case.verify("red"));
        assert!(!case.verify(""));
    }

    #[test]
    fn test_verify_empty_expected_never_matches() {
        let case = FraudCase {
            user_name: "amy".into(),
            ..Default::default()
        };
        assert!(!case.verify(""));
        assert!(!case.verify("anything"));
    }

    #[test]
    fn test_summary_full() {
        let summary = sample().summary();
        assert_eq!(
            summary,
            "Transaction at ABC Industry for ₹2,499. Card ending: 4242. Time: 2025-11-25 18:42. \
             Location: Mumbai. Category: e-commerce."
        );
    }

    #[test]
    fn test_summary_fallbacks() {
        let case = FraudCase {
            user_name: "amy".into(),
            transaction_amount: Some(json!(1200)),
            ..Default::default()
        };
        let summary = case.summary();
        assert!(summary.starts_with("Transaction at UNKNOWN for 1200."));
        assert!(summary.contains("Card ending: XXXX."));
        assert!(summary.contains("Category: unknown."));
    }

    #[test]
    fn test_with_outcome_statuses_and_notes() {
        let case = sample();

        let safe = case.with_outcome(Decision::Safe, None);
        assert_eq!(safe.status, FraudStatus::ConfirmedSafe);
        assert_eq!(safe.outcome_note, "Customer confirmed transaction as legitimate.");

        let fraud = case.with_outcome(Decision::Fraud, Some("User denied transaction."));
        assert_eq!(fraud.status, FraudStatus::ConfirmedFraud);
        assert_eq!(fraud.outcome_note, "User denied transaction.");

        let failed = case.with_outcome(Decision::parse("no idea"), None);
        assert_eq!(failed.status, FraudStatus::VerificationFailed);
        assert_eq!(failed.outcome_note, "Verification failed; could not proceed.");

        // original untouched
        assert_eq!(case.status, FraudStatus::PendingReview);
    }

    #[test]
    fn test_extra_keys_preserved() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["branchCode"], "MUM-07");
        assert_eq!(value["status"], "pending_review");
        assert_eq!(value["userName"], "john");
    }

    #[test]
    fn test_numeric_and_null_fields() {
        let case: FraudCase = serde_json::from_value(json!({
            "userName": "john",
            "securityIdentifier": 12345,
            "securityAnswer": 1984,
            "cardEnding": 4242,
            "transactionLocation": null,
            "status": null,
            "outcomeNote": null
        }))
        .unwrap();

        assert_eq!(case.status, FraudStatus::PendingReview);
        assert_eq!(case.outcome_note, "");
        assert!(case.verify(" 1984 "));
        assert!(case.summary().contains("Card ending: 4242. Time: unknown. Location: unknown."));

        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(value["securityIdentifier"], 12345);
        assert!(value["transactionLocation"].is_null());
        assert!(value.as_object().unwrap().contains_key("transactionLocation"));
        assert!(!value.as_object().unwrap().contains_key("transactionTime"));
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!(Decision::parse("SAFE"), Decision::Safe);
        assert_eq!(Decision::parse(" fraud "), Decision::Fraud);
        assert_eq!(Decision::parse("verification_failed"), Decision::VerificationFailed);
    }
}
