pub mod audit_service;
pub mod normalizer;

pub use audit_service::{AuditOptions, AuditService};
pub use normalizer::{NormalizerOptions, normalize_item, normalize_listing};
