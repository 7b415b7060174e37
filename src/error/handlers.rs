//! Error handlers
//!
//! Logs top-level failures and maps them to process exit codes.

use crate::error::types::{LakeError, ListingError};
use log::error;

/// Log a top-level error
pub fn handle_error(err: &LakeError) {
    error!("lakepath error: {}", err);
}

/// Convert error to a process exit code
pub fn error_to_exit_code(err: &LakeError) -> i32 {
    match err {
        LakeError::Config(_) => 78,
        LakeError::Listing(ListingError::DirectoryNotFound(_)) => 66,
        LakeError::Listing(ListingError::InvalidSortField(_)) => 64,
        LakeError::Listing(ListingError::Resolve(_)) | LakeError::Resolve(_) => 65,
        LakeError::Listing(ListingError::Storage(_)) | LakeError::Storage(_) => 74,
        LakeError::Serialization(_) => 70,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::types::{ResolveError, StorageError};

    #[test]
    fn exit_codes_follow_error_kind() {
        let missing = LakeError::from(ListingError::DirectoryNotFound("raw".into()));
        assert_eq!(error_to_exit_code(&missing), 66);

        let ambiguous = LakeError::from(ListingError::from(ResolveError::AmbiguousMatch {
            segment: "a".into(),
            candidates: vec!["A".into(), "a".into()],
        }));
        assert_eq!(error_to_exit_code(&ambiguous), 65);

        let io = LakeError::from(StorageError::Backend("down".into()));
        assert_eq!(error_to_exit_code(&io), 74);
    }
}
