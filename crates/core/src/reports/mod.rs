//! Balance sheet retrieval, flattening and pagination.
//!
//! The pipeline for one request:
//! - fetch the raw report JSON through a [`BalanceSheetSource`], retrying
//! - decode it into the report model
//! - flatten the section tree into one ordered row list
//! - slice the requested page and build the reply

mod assemble;
pub mod dates;
pub mod error;
pub mod flatten;
pub mod service;
pub mod source;
pub mod types;


pub use assemble::ReportAssembler;
pub use dates::{DisplayZone, NormalizedDate};
pub use error::ReportError;
pub use flatten::{FlatRow, FlattenedRows, flatten_reports, flatten_rows};
pub use service::BalanceSheetService;
pub use source::BalanceSheetSource;
pub use types::*;
