//! # Autopost Shared
//!
//! Wire types of the HTTP API: form and query payloads, response bodies and
//! RFC 7807 problem details.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
