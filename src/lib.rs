//! tcxlsx - YAML test-case definitions to Excel test specification sheets
//!
//! This crate converts hierarchical test-case definitions, written as YAML (or JSON),
//! into a formatted XLSX workbook: one worksheet per input document, a fixed
//! 14-column header, and one numbered row per test case. Nested suites become the
//! 大項目 / 中項目 / 小項目 hierarchy columns.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tcxlsx::{ExporterBuilder, InputFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create an exporter with default settings
//!     let exporter = ExporterBuilder::new().build()?;
//!
//!     // Load one document per input file
//!     let documents = exporter.load_documents(["login.yaml"], InputFormat::Yaml)?;
//!
//!     // Write one sheet per document
//!     exporter.export(&documents, "output.xlsx")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Input Format
//!
//! ```yaml
//! sheet_name: ログイン
//! 画面表示:
//!   - description: 初期表示
//!     procedure: URLを開く
//!     expected_value: ログイン画面が表示される
//!   - 入力チェック:
//!       - description: 空欄で送信
//!         expected_value: エラーメッセージが表示される
//! ```
//!
//! A mapping containing `description` is a test case; any other mapping is a group
//! with exactly one label. Recognized case fields: `description`, `procedure`,
//! `expected_value`, `category`, `result`, `operator`, `operate_day`, `verifier`,
//! `verify_day`, `comment` (and `No`, `大項目`, `中項目`, `小項目`).
//!
//! # Inspecting the Layout
//!
//! ```rust,no_run
//! use tcxlsx::{Document, ExporterBuilder};
//!
//! # fn main() -> Result<(), tcxlsx::TcXlsxError> {
//! let document = Document::from_yaml_str("sheet_name: S1\nA:\n  - description: d1\n", "inline")?;
//! let exporter = ExporterBuilder::new().build()?;
//! let grids = exporter.build_grids(&[document])?;
//! assert_eq!(grids[0].value(2, 5).and_then(|v| v.as_str()), Some("d1"));
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod columns;
mod document;
mod error;
mod flatten;
mod grid;
mod limits;
mod types;

// 公開API
pub use api::{ExportSettings, InputFormat, NumberPlacement, OutputFormat};
pub use builder::{ExportOutcome, Exporter, ExporterBuilder};
pub use columns::{header_captions, Field, COLUMN_COUNT};
pub use document::{load_documents, Case, Document, Group, Node, Suite, SHEET_NAME_KEY};
pub use error::TcXlsxError;
pub use grid::{CellStyle, GridCell, SheetGrid};
pub use limits::InputLimits;
pub use types::{CellCoord, CellValue};
