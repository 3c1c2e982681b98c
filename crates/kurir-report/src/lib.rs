//! Report pipeline for the kurir toolkit.
//!
//! One strictly left-to-right pass per run: tasks come in from
//! `kurir-api`, get resolved against the driver reference table,
//! reconciled into a realized visit sequence, bucketed into exception
//! records, aggregated into per-driver tables, and written out as CSV
//! sheets. Nothing is cached or persisted between runs.

pub mod aggregate;
pub mod classify;
pub mod emit;
pub mod job;
pub mod reconcile;
pub mod reports;
pub mod resolver;
pub mod table;

pub use aggregate::{reconciliation_groups, summarize, Counts, DriverGroup, DriverSummary};
pub use classify::{classify_all, customer_code, ExceptionBucket, ExceptionRecord};
pub use emit::write_report;
pub use job::ReportJob;
pub use reconcile::{reconcile, RealizedStop, SequenceTag};
pub use reports::{delivered_report, pending_so_report, ro_vs_real_report};
pub use resolver::{temperature_tag, DriverResolver, TempTag};
pub use table::{Report, Sheet};

use thiserror::Error;

/// Errors raised while producing or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Fetch failure; keeps the API taxonomy (auth, transient, empty
    /// result, network) intact for the surface's message.
    #[error(transparent)]
    Api(#[from] kurir_api::ApiError),

    /// Destination directory or file could not be created or written.
    #[error("failed to write report file {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// A background report job died before producing a result. Carries
    /// the original diagnostic text so the failure can be reported whole
    /// instead of as a partial spreadsheet.
    #[error("report job failed: {0}")]
    Unexpected(String),
}
