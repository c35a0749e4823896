//! JSON file persistence for agent data.
//!
//! Every data file is read and rewritten whole. There is no locking and no
//! transactional guarantee; one session touches a file at a time.
//!
//! Three policies for a missing file:
//! - **init**: create the file with the default value (fraud DB, leads)
//! - **default**: log a warning and use an empty template (FAQ, catalog, tutor content)
//! - **error**: the caller decides (order files are written, never read back missing)

mod json_file;

pub use json_file::{append_to_array, load_or_default, load_or_init, read_json, save_json};
