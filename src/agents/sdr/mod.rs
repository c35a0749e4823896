//! Sales development (SDR) agent
//!
//! Answers company questions from a small FAQ file using keyword scoring and
//! captures the prospect's details as a lead, appended to a JSON array file.

mod faq;
mod lead;
mod tools;

pub use faq::{FaqBook, FaqEntry, tokenize};
pub use lead::{Lead, LeadField, LeadRecord};
pub use tools::{CompanyInfoTool, FindFaqTool, GetLeadTool, SaveLeadTool, UpdateLeadTool};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::{Agent, AgentKind};
use crate::config::GlobalConfig;
use crate::error::Result;
use crate::store;
use crate::tools::ToolExecutor;

pub const INSTRUCTIONS: &str = "You are a friendly sales development representative. \
Greet the visitor, ask what brought them here and what they are working on. \
Answer questions about the company only with get_company_info and find_faq; if find_faq \
finds nothing, say you will have the team follow up instead of guessing. \
During the conversation naturally collect the visitor's name, company, email, role, use case, \
team size and timeline, storing each with update_lead as soon as you hear it. \
When the visitor signals they are done, summarize what you captured and call save_lead.";

/// Session state shared by the SDR tools
pub struct SdrDesk {
    faq: FaqBook,
    leads_file: PathBuf,
    lead: Mutex<Lead>,
}

impl SdrDesk {
    pub fn new(faq: FaqBook, leads_file: impl AsRef<Path>) -> Self {
        Self {
            faq,
            leads_file: leads_file.as_ref().to_path_buf(),
            lead: Mutex::new(Lead::default()),
        }
    }

    pub fn faq(&self) -> &FaqBook {
        &self.faq
    }

    pub async fn lead(&self) -> Lead {
        self.lead.lock().await.clone()
    }

    pub async fn update_lead(&self, field: LeadField, value: &str) -> Lead {
        let mut lead = self.lead.lock().await;
        lead.set(field, value);
        lead.clone()
    }

    /// Append the current lead to the leads file and start a fresh one.
    ///
    /// Returns the saved record and the number of leads now on file.
    pub async fn save_lead(&self) -> Result<(LeadRecord, usize)> {
        let mut lead = self.lead.lock().await;
        let record = lead.clone().into_record(Utc::now());
        let total = store::append_to_array(&self.leads_file, serde_json::to_value(&record)?)?;
        *lead = Lead::default();
        Ok((record, total))
    }
}

/// Build the SDR agent from config
pub fn agent(config: &GlobalConfig) -> Result<Agent> {
    let faq = FaqBook::load(&config.paths.faq_file)?;
    log::info!(
        "SDR agent loaded {} FAQ entries from {}",
        faq.entries.len(),
        config.paths.faq_file.display()
    );
    let desk = Arc::new(SdrDesk::new(faq, &config.paths.leads_file));

    let executor = ToolExecutor::new()
        .with_tool(CompanyInfoTool::new(desk.clone()))
        .with_tool(FindFaqTool::new(desk.clone()))
        .with_tool(UpdateLeadTool::new(desk.clone()))
        .with_tool(GetLeadTool::new(desk.clone()))
        .with_tool(SaveLeadTool::new(desk));

    Ok(Agent::new(AgentKind::Sdr, INSTRUCTIONS, config.session.clone(), executor))
}
