pub mod config;
pub mod error;
pub mod metric;
pub mod record;
pub mod summary;
pub mod table;
pub mod util;

pub use error::ReportError;
