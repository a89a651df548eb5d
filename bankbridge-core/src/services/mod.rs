//! Business logic services
//!
//! Each service composes the client and normalizer into one reporting
//! strategy: per-account summary, grouped summary, CSV export, or
//! downstream forwarding.

pub mod export;
pub mod forward;
pub mod report;

pub use export::{CsvExporter, ExportOutcome, ExportService};
pub use forward::{ForwardOutcome, ForwardService};
pub use report::{
    AccountActivity, DailySummary, EntityGroupSummary, GroupedSummary, ReportService,
};
