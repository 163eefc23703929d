use thiserror::Error;

/// Errors raised by the library when its inputs break the game's closed rules.
#[derive(Error, Debug)]
pub enum WordError {
    /// A gem name outside the fixed category set.
    #[error("unknown gem category '{0}'")]
    UnknownGem(String),

    /// A gem assignment string that is not `gem=letters[,gem=letters...]`.
    #[error("malformed gem assignment '{0}', expected e.g. 'ruby=t,diamond=ab'")]
    MalformedGemSpec(String),

    /// A "qu" rule name that is not one of fused, guarded or unguarded.
    #[error("unknown qu rule '{0}', expected fused, guarded or unguarded")]
    UnknownQuRule(String),

    /// A compiled dictionary that is truncated or was written by something else.
    #[error("invalid compiled dictionary: {0}")]
    CompiledFormat(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
