use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnipzError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Snippet not found: {0}")]
    NotFound(String),

    #[error("Duplicate name: \"{0}\" already exists in this folder")]
    DuplicateName(String),

    #[error("Unsupported data version: {0}")]
    UnsupportedVersion(i64),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

/// Machine-readable failure taxonomy reported alongside error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    InvalidInput,
    FolderNotFound,
    NotFound,
    DuplicateName,
    UnsupportedVersion,
    MalformedData,
    Storage,
}

impl SnipzError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SnipzError::InvalidInput(_) => FailureKind::InvalidInput,
            SnipzError::FolderNotFound(_) => FailureKind::FolderNotFound,
            SnipzError::NotFound(_) => FailureKind::NotFound,
            SnipzError::DuplicateName(_) => FailureKind::DuplicateName,
            SnipzError::UnsupportedVersion(_) => FailureKind::UnsupportedVersion,
            SnipzError::MalformedData(_) => FailureKind::MalformedData,
            SnipzError::Io(_)
            | SnipzError::Serialization(_)
            | SnipzError::Config(_)
            | SnipzError::Store(_) => FailureKind::Storage,
        }
    }
}

impl From<confique::Error> for SnipzError {
    fn from(err: confique::Error) -> Self {
        SnipzError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnipzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_share_a_kind() {
        let io = SnipzError::Io(std::io::Error::other("disk full"));
        assert_eq!(io.kind(), FailureKind::Storage);
        assert_eq!(
            SnipzError::Store("x".into()).kind(),
            FailureKind::Storage
        );
    }

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = SnipzError::FolderNotFound("Work".into());
        assert_eq!(err.to_string(), "Folder not found: Work");
        let err = SnipzError::UnsupportedVersion(9999);
        assert_eq!(err.to_string(), "Unsupported data version: 9999");
    }
}
