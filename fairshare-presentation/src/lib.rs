#![warn(clippy::uninlined_format_args)]

pub mod allocation_presenter;
pub mod csv_report;
pub mod error_presenter;
pub mod eval_presenter;
pub mod settlement_presenter;
pub mod text_table;

pub use allocation_presenter::{AllocationPresenter, AllocationView, summary_line};
pub use csv_report::{CsvReport, ReportError};
pub use error_presenter::{format_decode_error, format_split_error, format_validation_error};
pub use eval_presenter::EvalPresenter;
pub use settlement_presenter::{SettlementPresenter, SettlementView};
