//! Settings model and storage
//!
//! - **field**: names of the fields the editor tracks
//! - **snapshot**: the persisted configuration object
//! - **store**: the JSON file in the application root

pub mod field;
pub mod snapshot;
pub mod store;

pub use field::{FieldId, FieldValue};
pub use snapshot::SettingsSnapshot;
pub use store::SettingsStore;
