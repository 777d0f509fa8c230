/// Convenience alias used by every fallible operation in the crate.
pub type LuxelResult<T> = Result<T, LuxelError>;

#[derive(thiserror::Error, Debug)]
/// Error taxonomy of the texture subsystem.
///
/// All asset-facing failures propagate as values; the caller decides whether
/// to abort the render or substitute a placeholder.
pub enum LuxelError {
    /// Recoverable bad input: empty source strings, mismatched buffer
    /// lengths, reversed query corners.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source could not be resolved to a readable file. Carries the
    /// directory list that was consulted so callers can log it.
    #[error("texture not found: '{path}' (searched: {})", searched_display(.searched))]
    NotFound {
        /// Source string as the caller requested it.
        path: String,
        /// Directories consulted during resolution, in search order.
        searched: Vec<String>,
    },

    /// The decoder rejected or could not parse the file contents.
    #[error("decode error for '{path}': {reason}")]
    Decode {
        /// Resolved path handed to the decoder.
        path: String,
        /// Decoder's own description of the failure.
        reason: String,
    },

    /// A programming-error condition such as buffer-size arithmetic overflow;
    /// never a transient runtime state.
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// Annotated IO or collaborator error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LuxelError {
    /// Build a [`LuxelError::Validation`] from any message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LuxelError::NotFound`] with its searched-directory payload.
    pub fn not_found(path: impl Into<String>, searched: Vec<String>) -> Self {
        Self::NotFound {
            path: path.into(),
            searched,
        }
    }

    /// Build a [`LuxelError::Decode`] for a resolved path.
    pub fn decode(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`LuxelError::Invariant`] from any message.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}

fn searched_display(searched: &[String]) -> String {
    if searched.is_empty() {
        "<no search paths>".to_string()
    } else {
        searched.join(", ")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
