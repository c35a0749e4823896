//! Lead capture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields a sales rep collects from a prospect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Company,
    Email,
    Role,
    UseCase,
    TeamSize,
    Timeline,
}

impl LeadField {
    pub const ALL: [LeadField; 7] = [
        LeadField::Name,
        LeadField::Company,
        LeadField::Email,
        LeadField::Role,
        LeadField::UseCase,
        LeadField::TeamSize,
        LeadField::Timeline,
    ];

    /// Fields that must be present before a lead is saved
    pub const REQUIRED: [LeadField; 2] = [LeadField::Name, LeadField::Email];

    pub fn key(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Company => "company",
            LeadField::Email => "email",
            LeadField::Role => "role",
            LeadField::UseCase => "use_case",
            LeadField::TeamSize => "team_size",
            LeadField::Timeline => "timeline",
        }
    }

    /// Accepts the JSON key, with spaces or dashes in place of underscores.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|f| f.key() == normalized)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub use_case: Option<String>,
    pub team_size: Option<String>,
    pub timeline: Option<String>,
}

impl Lead {
    fn slot(&mut self, field: LeadField) -> &mut Option<String> {
        match field {
            LeadField::Name => &mut self.name,
            LeadField::Company => &mut self.company,
            LeadField::Email => &mut self.email,
            LeadField::Role => &mut self.role,
            LeadField::UseCase => &mut self.use_case,
            LeadField::TeamSize => &mut self.team_size,
            LeadField::Timeline => &mut self.timeline,
        }
    }

    fn get(&self, field: LeadField) -> Option<&str> {
        let value = match field {
            LeadField::Name => &self.name,
            LeadField::Company => &self.company,
            LeadField::Email => &self.email,
            LeadField::Role => &self.role,
            LeadField::UseCase => &self.use_case,
            LeadField::TeamSize => &self.team_size,
            LeadField::Timeline => &self.timeline,
        };
        value.as_deref()
    }

    /// Store a trimmed value; blank values clear the field.
    pub fn set(&mut self, field: LeadField, value: &str) {
        let trimmed = value.trim();
        *self.slot(field) = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Keys of every field not yet collected
    pub fn missing(&self) -> Vec<&'static str> {
        LeadField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .map(LeadField::key)
            .collect()
    }

    /// Keys of required fields not yet collected
    pub fn missing_required(&self) -> Vec<&'static str> {
        LeadField::REQUIRED
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .map(LeadField::key)
            .collect()
    }

    pub fn into_record(self, captured_at: DateTime<Utc>) -> LeadRecord {
        LeadRecord {
            lead: self,
            captured_at,
        }
    }
}

/// A lead as appended to the leads file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(flatten)]
    pub lead: Lead,
    pub captured_at: DateTime<Utc>,
}
