mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::run;
pub use application::use_cases::test_case_export::{export_csv, export_xlsx, import_xlsx};
pub use application::use_cases::test_case_parser::{parse_test_cases, TestCaseParser};
pub use domain::error::{AppError, Result};
pub use domain::test_case::{ParseReport, ParseWarning, TestCaseField, TestCaseRecord};
