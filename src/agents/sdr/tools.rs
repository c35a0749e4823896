//! SDR agent tools

use std::sync::Arc;

use async_trait::async_trait;
use eyre::eyre;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{LeadField, SdrDesk};
use crate::tools::{Tool, ToolContext, ToolResult, parse_input};

pub struct CompanyInfoTool {
    desk: Arc<SdrDesk>,
}

impl CompanyInfoTool {
    pub fn new(desk: Arc<SdrDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for CompanyInfoTool {
    fn name(&self) -> &'static str {
        "get_company_info"
    }

    fn description(&self) -> &'static str {
        "Get the company profile (name, description and other basics)."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        Ok(ToolResult::success(Value::Object(self.desk.faq().company.clone())))
    }
}

pub struct FindFaqTool {
    desk: Arc<SdrDesk>,
}

impl FindFaqTool {
    pub fn new(desk: Arc<SdrDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for FindFaqTool {
    fn name(&self) -> &'static str {
        "find_faq"
    }

    fn description(&self) -> &'static str {
        "Find the FAQ answer that best matches the visitor's question."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The visitor's question in their own words"
                }
            },
            "required": ["question"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let question = input["question"].as_str().ok_or_else(|| eyre!("question is required"))?;

        match self.desk.faq().find(question) {
            Some((entry, score)) => {
                log::info!("[{}] FAQ hit (score={}) for {:?}", ctx.session_id, score, question);
                Ok(ToolResult::success(json!({
                    "found": true,
                    "question": entry.question,
                    "answer": entry.answer,
                    "score": score,
                })))
            }
            None => {
                log::info!("[{}] No FAQ match for {:?}", ctx.session_id, question);
                Ok(ToolResult::success(json!({"found": false})))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateLeadArgs {
    field: String,
    value: String,
}

pub struct UpdateLeadTool {
    desk: Arc<SdrDesk>,
}

impl UpdateLeadTool {
    pub fn new(desk: Arc<SdrDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for UpdateLeadTool {
    fn name(&self) -> &'static str {
        "update_lead"
    }

    fn description(&self) -> &'static str {
        "Store one piece of the visitor's details on the lead being captured."
    }

    fn input_schema(&self) -> Value {
        let fields: Vec<_> = LeadField::ALL.iter().map(|f| f.key()).collect();
        json!({
            "type": "object",
            "properties": {
                "field": {"type": "string", "enum": fields},
                "value": {"type": "string"}
            },
            "required": ["field", "value"]
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let args: UpdateLeadArgs = parse_input(self.name(), input)?;

        let Some(field) = LeadField::parse(&args.field) else {
            return Ok(ToolResult::success(json!({
                "status": "error",
                "message": "unknown_field",
                "field": args.field,
            })));
        };

        let lead = self.desk.update_lead(field, &args.value).await;
        Ok(ToolResult::success(json!({
            "status": "ok",
            "lead": lead,
            "missing": lead.missing(),
        })))
    }
}

pub struct GetLeadTool {
    desk: Arc<SdrDesk>,
}

impl GetLeadTool {
    pub fn new(desk: Arc<SdrDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for GetLeadTool {
    fn name(&self) -> &'static str {
        "get_lead"
    }

    fn description(&self) -> &'static str {
        "Show the lead captured so far and which details are still missing."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let lead = self.desk.lead().await;
        Ok(ToolResult::success(json!({"lead": lead, "missing": lead.missing()})))
    }
}

pub struct SaveLeadTool {
    desk: Arc<SdrDesk>,
}

impl SaveLeadTool {
    pub fn new(desk: Arc<SdrDesk>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl Tool for SaveLeadTool {
    fn name(&self) -> &'static str {
        "save_lead"
    }

    fn description(&self) -> &'static str {
        "Save the captured lead at the end of the conversation. Requires name and email."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let missing = self.desk.lead().await.missing_required();
        if !missing.is_empty() {
            return Ok(ToolResult::success(json!({
                "status": "error",
                "message": "missing_fields",
                "missing": missing,
            })));
        }

        let (record, total) = self.desk.save_lead().await?;
        log::info!("[{}] Saved lead {:?} ({} on file)", ctx.session_id, record.lead.name, total);
        Ok(ToolResult::success(json!({
            "status": "ok",
            "saved": record,
            "total_leads": total,
        })))
    }
}
