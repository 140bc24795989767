//! Network and file I/O: the estimator HTTP client and report export.

pub mod estimator;
pub mod report_pdf;
