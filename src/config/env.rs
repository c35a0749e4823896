//! Environment overrides for data file locations.
//!
//! Each agent's data file can be redirected with an environment variable.
//! `.env.local` in the working directory is loaded first; variables already
//! set in the process environment win over the file.

use std::path::PathBuf;

use super::GlobalConfig;

pub const FRAUD_DB: &str = "FRAUD_DB";
pub const FAQ_FILE: &str = "FAQ_FILE";
pub const LEADS_FILE: &str = "LEADS_FILE";
pub const CATALOG_FILE: &str = "CATALOG_FILE";
pub const ORDERS_DIR: &str = "ORDERS_DIR";
pub const TUTOR_CONTENT: &str = "TUTOR_CONTENT";

/// Load `.env.local` if present.
pub fn load_dotenv() {
    match dotenvy::from_filename(".env.local") {
        Ok(path) => log::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => log::debug!("No .env.local found"),
        Err(e) => log::warn!("Failed to load .env.local: {}", e),
    }
}

impl GlobalConfig {
    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut PathBuf); 6] = [
            (FRAUD_DB, &mut self.paths.fraud_db),
            (FAQ_FILE, &mut self.paths.faq_file),
            (LEADS_FILE, &mut self.paths.leads_file),
            (CATALOG_FILE, &mut self.paths.catalog_file),
            (ORDERS_DIR, &mut self.paths.orders_dir),
            (TUTOR_CONTENT, &mut self.paths.tutor_content),
        ];

        for (key, slot) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                log::debug!("{} overrides {} -> {}", key, slot.display(), value);
                *slot = PathBuf::from(value);
            }
        }
    }
}
