//! Error types for trackdeck.
//!
//! Defines all error codes and types used throughout the crate for
//! consistent error handling and reporting.

use std::fmt;

/// Error codes returned by trackdeck operations.
///
/// These codes allow callers to programmatically handle specific error
/// conditions without parsing error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Accessed an empty ownership handle.
    /// Trigger: `get`/`get_mut` on a `Handle` that owns nothing.
    NullAccess,

    /// A track could not be deep-copied.
    /// Trigger: cloning a corrupt track (empty title or truncated waveform).
    CloneFailure,

    /// A library index was out of range.
    /// Trigger: playlist references a track slot that does not exist.
    InvalidIndex,

    /// Session file not found on disk.
    /// Trigger: path passed via `--session` does not exist or is unreadable.
    SessionNotFound,

    /// Session file exists but could not be parsed.
    /// Trigger: malformed JSON or unknown track format.
    SessionParseFailed,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NullAccess => "NULL_ACCESS",
            ErrorCode::CloneFailure => "CLONE_FAILURE",
            ErrorCode::InvalidIndex => "INVALID_INDEX",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::SessionParseFailed => "SESSION_PARSE_FAILED",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::NullAccess => "Dereferenced an empty ownership handle",
            ErrorCode::CloneFailure => "Failed to produce a deep copy of a track",
            ErrorCode::InvalidIndex => "Library index is out of range",
            ErrorCode::SessionNotFound => "Session file not found",
            ErrorCode::SessionParseFailed => "Session file could not be parsed",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::NullAccess => {
                "Check is_loaded() before accessing a handle, or keep ownership \
                 transfers (take/release) paired with a reset"
            }
            ErrorCode::CloneFailure => {
                "Verify the source track has a non-empty title and an intact \
                 waveform buffer; rebuild it from its session entry if not"
            }
            ErrorCode::InvalidIndex => {
                "Playlist indices are 1-based and must not exceed the library \
                 size; fix the track_indices list in the session file"
            }
            ErrorCode::SessionNotFound => {
                "Check the --session path, or omit it to run the built-in demo \
                 session"
            }
            ErrorCode::SessionParseFailed => {
                "Validate the session file is JSON with a top-level name, \
                 cache_capacity, library, and playlists; each library entry \
                 needs a \"format\" of \"mp3\" or \"wav\""
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for trackdeck operations.
#[derive(Debug)]
pub struct TrackdeckError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TrackdeckError {
    /// Creates a new TrackdeckError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new TrackdeckError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a NULL_ACCESS error.
    pub fn null_access(context: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NullAccess,
            format!("Empty handle accessed: {}", context.into()),
        )
    }

    /// Creates a CLONE_FAILURE error.
    pub fn clone_failure(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::CloneFailure,
            format!(
                "Failed to clone track \"{}\": {}",
                title.into(),
                reason.into()
            ),
        )
    }

    /// Creates an INVALID_INDEX error.
    pub fn invalid_index(index: usize, library_size: usize) -> Self {
        Self::new(
            ErrorCode::InvalidIndex,
            format!(
                "Invalid track index: {} (library holds {} tracks, indices are 1-based)",
                index, library_size
            ),
        )
    }

    /// Creates a SESSION_NOT_FOUND error.
    pub fn session_not_found(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(
            ErrorCode::SessionNotFound,
            format!("Cannot read session file: {}", path.into()),
            source,
        )
    }

    /// Creates a SESSION_PARSE_FAILED error.
    pub fn session_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(
            ErrorCode::SessionParseFailed,
            format!("Cannot parse session file: {}", path.into()),
            source,
        )
    }
}

impl fmt::Display for TrackdeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for TrackdeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using TrackdeckError.
pub type Result<T> = std::result::Result<T, TrackdeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::NullAccess.as_str(), "NULL_ACCESS");
        assert_eq!(ErrorCode::CloneFailure.as_str(), "CLONE_FAILURE");
        assert_eq!(ErrorCode::InvalidIndex.as_str(), "INVALID_INDEX");
        assert_eq!(ErrorCode::SessionNotFound.as_str(), "SESSION_NOT_FOUND");
        assert_eq!(ErrorCode::SessionParseFailed.as_str(), "SESSION_PARSE_FAILED");
    }

    #[test]
    fn error_code_recovery_hints_not_empty() {
        // Ensure all error codes have non-empty recovery hints
        assert!(!ErrorCode::NullAccess.recovery_hint().is_empty());
        assert!(!ErrorCode::CloneFailure.recovery_hint().is_empty());
        assert!(!ErrorCode::InvalidIndex.recovery_hint().is_empty());
        assert!(!ErrorCode::SessionNotFound.recovery_hint().is_empty());
        assert!(!ErrorCode::SessionParseFailed.recovery_hint().is_empty());
    }

    #[test]
    fn invalid_index_display() {
        let err = TrackdeckError::invalid_index(7, 3);
        assert!(err.to_string().contains("INVALID_INDEX"));
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains("Recovery:"));
    }

    #[test]
    fn clone_failure_carries_title() {
        let err = TrackdeckError::clone_failure("Midnight City", "empty title");
        assert_eq!(err.code, ErrorCode::CloneFailure);
        assert!(err.message.contains("Midnight City"));
    }

    #[test]
    fn with_source_chains() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = TrackdeckError::session_not_found("/tmp/missing.json", io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
