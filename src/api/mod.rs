//! REST API module.
//!
//! One file per resource; handlers return `Result<Json<_>, AppError>` and
//! let the error type map itself onto a status code and body.

mod filters;
mod members;

pub use filters::*;
pub use members::*;
