//! Shared error type across wsDuet crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, DuetError>;

/// Unified error type used by core and gateway.
///
/// Connection-level failures (`Write`, `Read`) are terminal for the connection
/// they occur on. Closing an already-closed connection and writing after close
/// are not errors and have no variant here.
#[derive(Debug, Error)]
pub enum DuetError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("upgrade failed: {0}")]
    Upgrade(String),
    #[error("write failed: {0}")]
    Write(String),
    #[error("read failed: {0}")]
    Read(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl DuetError {
    /// Stable tag for logs and assertions.
    pub fn code(&self) -> &'static str {
        match self {
            DuetError::BadRequest(_) => "BAD_REQUEST",
            DuetError::Config(_) => "CONFIG",
            DuetError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            DuetError::Upgrade(_) => "UPGRADE_FAILED",
            DuetError::Write(_) => "WRITE_FAILED",
            DuetError::Read(_) => "READ_FAILED",
            DuetError::Internal(_) => "INTERNAL",
        }
    }
}
