use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::Principal;
use crate::store::Cat;

/// Parse a path identifier. Record ids are opaque to clients, so a value
/// that cannot name any record reports the same way as an absent one.
pub fn parse_record_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("cat {} not found", raw)))
}

/// Existence guard: the single point where an absent resolver result becomes
/// a terminal 404. Show, update and destroy pass through here; index and
/// create never do.
pub fn require_exists(found: Option<Cat>, id: Uuid) -> Result<Cat, ApiError> {
    found.ok_or_else(|| ApiError::not_found(format!("cat {} not found", id)))
}

/// Ownership predicate, kept freestanding so it is testable without any
/// request machinery.
pub fn owns(cat: &Cat, principal: &Principal) -> bool {
    cat.owner == principal.id
}

/// Ownership guard for mutating operations on an existing record. Reads are
/// not ownership-scoped in this resource.
pub fn require_ownership(cat: &Cat, principal: &Principal) -> Result<(), ApiError> {
    if owns(cat, principal) {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "cat {} does not belong to you",
            cat.id
        )))
    }
}
