//! xlsxqa - Pure-Rust extractor of Q&A fine-tuning pairs from Excel knowledge bases
//!
//! This crate walks semi-structured spreadsheets (merged cells, inconsistent
//! per-sheet layouts) and segments their text cells into question/answer pairs,
//! then writes them in formats suitable for supervised fine-tuning.
//!
//! Each sheet goes through three stages:
//!
//! 1. **Flatten**: populated cells are grouped by row, formulas and navigation
//!    labels are dropped, and same-row values are joined into one line.
//! 2. **Segment**: each line is classified as a question or an answer, and a
//!    two-state machine groups answers under the preceding question.
//! 3. **Emit**: whitespace is normalized and the pair is tagged with its sheet
//!    and product name.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxqa::{ExtractorBuilder, OutputFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new().build()?;
//!
//!     let report = extractor.extract(File::open("knowledge.xlsx")?)?;
//!     println!("extracted {} pairs", report.pairs.len());
//!
//!     for format in OutputFormat::all() {
//!         let output = File::create(format.default_file_name())?;
//!         extractor.render(format, &report.pairs, output)?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Segmenting rows without a workbook
//!
//! ```rust
//! use xlsxqa::{ExtractorBuilder, RowUnit};
//!
//! # fn main() -> Result<(), xlsxqa::XlsxQaError> {
//! let extractor = ExtractorBuilder::new().build()?;
//! let rows = vec![
//!     RowUnit::new(1, "Note: rates subject to change."),
//!     RowUnit::new(2, "What is the rate?"),
//!     RowUnit::new(3, "5% APR."),
//! ];
//!
//! let pairs = extractor.extract_rows("Rates", "Term Deposit", &rows);
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].answer, "5% APR.");
//! # Ok(())
//! # }
//! ```
//!
//! # Merging an external FAQ
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxqa::{ExtractorBuilder, FaqDocument};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new().build()?;
//!     let mut report = extractor.extract(File::open("knowledge.xlsx")?)?;
//!
//!     let faq = FaqDocument::from_reader(File::open("faq.json")?)?;
//!     extractor.merge_faq(&mut report.pairs, &faq);
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod emit;
mod error;
mod faq;
mod flatten;
mod output;
mod parser;
mod security;
mod segment;
mod types;

// 公開API
pub use api::{
    OutputFormat, SheetSelector, DEFAULT_FAQ_SOURCE, DEFAULT_FORMULA_MARKER,
    DEFAULT_QUESTION_MARK_WINDOW, DEFAULT_QUESTION_PREFIXES, DEFAULT_ROW_SEPARATOR,
    DEFAULT_SENTINEL_LABELS, DEFAULT_SKIP_SHEETS, DEFAULT_SYSTEM_PROMPT,
};
pub use builder::{Extractor, ExtractorBuilder};
pub use emit::{normalize_text, RecordEmitter};
pub use error::XlsxQaError;
pub use faq::{FaqCategory, FaqDocument, FaqEntry};
pub use segment::{segment_rows, QuestionClassifier, RowKind, SegmentState, Segmenter};
pub use types::{
    product_counts, Cell, CellCoord, ExtractionReport, QaPair, RowUnit, SheetReport,
};
