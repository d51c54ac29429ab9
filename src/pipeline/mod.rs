//! Request-handling pipeline stages shared by the resource handlers: payload
//! sanitization and the existence/ownership guards. Each stage either returns
//! a value that advances the request or an [`ApiError`](crate::error::ApiError)
//! that short-circuits it.

pub mod guards;
pub mod sanitize;

pub use guards::{owns, parse_record_id, require_exists, require_ownership};
pub use sanitize::{remove_blank_fields, strip_protected_fields};
