pub mod debris;
pub mod ids;
pub mod listing;
pub mod record;
pub mod report;

pub use debris::{DebrisFilter, ProcessingStatus, extension_of};
pub use ids::{AuditRunId, ScanId};
pub use listing::{ExploredEntry, ListingItem, ScanStatus};
pub use record::Record;
pub use report::{AuditEntry, AuditReport, ContentHash, DuplicateGroup, TrashStats};
