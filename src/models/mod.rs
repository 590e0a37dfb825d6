//! Response models for the directory API.
//!
//! Each model is shaped from a raw store document and validated at
//! construction; instances live for a single request and serialize straight
//! into the response body.

mod docref;
mod enums;
mod filter;
mod member;
mod shape;

pub use docref::*;
pub use enums::*;
pub use filter::*;
pub use member::*;
