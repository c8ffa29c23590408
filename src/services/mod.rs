//! Service layer for business logic.
//!
//! Separates business logic from UI handlers for better testability and maintainability.

pub mod clipboard_service;
pub mod export_service;
pub mod notification_service;
pub mod processing_service;
pub mod removal_service;

pub use export_service::{ClipboardShareTarget, DialogFileSaver, ExportService};
pub use notification_service::{LogNotifier, Notice, Notifier};
pub use processing_service::{ProcessOutcome, ProcessingService};
pub use removal_service::HttpBackgroundRemover;
