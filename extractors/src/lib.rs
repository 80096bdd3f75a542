//! Extractors Crate
//!
//! The receipt-to-expense pipeline used by the ExpenseWise API. Everything
//! here is synchronous and free of shared mutable state.
//!
//! # Components
//!
//! - `expense_patterns`: the pattern library and the `ExpenseExtractor`
//! - `categorizer`: keyword categorization of titles and descriptions
//! - `validator`: minimum-viability checks on an extracted record
//! - `summary`: totals, averages and category breakdowns
//! - `title`: expense title suggestions
//! - `document`: MIME dispatch and pluggable text acquisition
//! - `date_parser`, `csv_export`: helpers for persisting and exporting expenses
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{extract, suggest_title, validate};
//!
//! let record = extract("Vendor: Corner Cafe\nDate: 01/15/2024\nTotal $8.25");
//! let report = validate(&record);
//! let title = suggest_title(record.vendor.as_deref(), record.amount.unwrap_or(0.0), record.category);
//! ```

pub mod categorizer;
pub mod csv_export;
pub mod date_parser;
pub mod document;
pub mod expense_patterns;
pub mod summary;
pub mod title;
pub mod validator;

// Re-export commonly used items
pub use categorizer::{categorize, categorize_text};
pub use csv_export::write_expenses_csv;
pub use date_parser::{normalize_date, to_iso};
pub use document::{DocumentKind, DocumentProcessor, SidecarTextSource, TextSource};
pub use expense_patterns::{extract, ExpenseExtractor};
pub use summary::{monthly_trend, summarize};
pub use title::suggest_title;
pub use validator::validate;
