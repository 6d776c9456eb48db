//! Random generation settings for relation fields.
//!
//! Settings are persisted outside the process and read back as untrusted
//! input. [`reconcile`] turns a field and whatever is stored for it into a
//! configuration that is always consistent with the field's type and the
//! method registry; the mutators in [`mutate`] only ever write reconciled
//! content back.

pub mod doctor;
pub mod errors;
pub mod mutate;
pub mod persist;
pub mod reconcile;
pub mod session;
pub mod stored;

pub use doctor::{DoctorIssue, DoctorLevel, DoctorReport, inspect};
pub use errors::{PersistError, PersistResult};
pub use mutate::{IgnoredReason, Mutation, apply_update, prune, reset, set_method, update};
pub use persist::{
    JsonFilePersistence, MemoryPersistence, RawSettings, SettingsPersistence, write_bytes_atomic,
};
pub use reconcile::{ResolvedFieldConfig, reconcile, reconcile_relation};
pub use session::{PruneOutcome, SettingsSession, UpdateOutcome};
pub use stored::{SettingsStore, StoredFieldSettings};
