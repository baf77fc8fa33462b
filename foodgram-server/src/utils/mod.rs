//! Common utilities and shared infrastructure
//!
//! - [`AppError`] / [`AppResult`] - unified error handling
//! - [`logger`] - tracing setup
//! - [`pagination`] - page-number pagination envelope
//! - [`image`] - recipe image decoding and storage
//! - [`qs`] - raw query-string parsing (repeated parameters)
//! - [`validation`] - text limits and field checks

pub mod error;
pub mod image;
pub mod logger;
pub mod pagination;
pub mod qs;
pub mod result;
pub mod validation;

pub use error::{AppError, ErrorBody, FieldErrors};
pub use logger::{init_logger, init_logger_with_file};
pub use pagination::{Page, PageQuery};
pub use result::AppResult;
