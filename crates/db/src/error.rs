//! Connection-level failures and classification of tolerated server replies.

use mongodb::error::{CommandError, ErrorKind};
use thiserror::Error;

/// Server error code for `NamespaceExists`, returned when creating a
/// collection that is already there.
pub const NAMESPACE_EXISTS_CODE: i32 = 48;

/// Server error code for `NamespaceNotFound`, returned when listing indexes
/// of a collection that does not exist yet.
pub const NAMESPACE_NOT_FOUND_CODE: i32 = 26;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("invalid MongoDB URI '{uri}'")]
    InvalidUri {
        uri: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("failed to create MongoDB client")]
    Connect(#[source] mongodb::error::Error),

    #[error("MongoDB did not answer ping")]
    Ping(#[source] mongodb::error::Error),
}

/// Whether the error is the server refusing to create an existing collection.
pub fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
    is_command_code(err.kind.as_ref(), NAMESPACE_EXISTS_CODE)
}

/// Whether the error reports a missing collection.
pub fn is_namespace_not_found(err: &mongodb::error::Error) -> bool {
    is_command_code(err.kind.as_ref(), NAMESPACE_NOT_FOUND_CODE)
}

fn is_command_code(kind: &ErrorKind, expected: i32) -> bool {
    matches!(kind, ErrorKind::Command(CommandError { code, .. }) if *code == expected)
}
