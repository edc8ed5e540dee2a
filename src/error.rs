//! The structured failure taxonomy the cores report through.
//!
//! The original C implementation this crate's behavior is modeled on reports
//! failures through an external, back-traceable error object (`libcerror`):
//! every failing call appends one frame describing what it was doing when a
//! lower-level call failed. This crate plays the same structural role with a
//! normal `Result` chain: each variant below corresponds to one of the
//! abstract failure kinds the cores must be able to report, and `#[source]`
//! lets a caller walk the chain the same way `libcerror` frames would be
//! walked.

use thiserror::Error;

/// A failure reported by the AES or SHA-512 core.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A null pointer where non-null was required, an out-of-range size, an
    /// unsupported key bit size or direction, or a wrong IV/nonce/tweak
    /// length.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Attempted to initialize a context whose out-parameter already points
    /// at a non-null value.
    ///
    /// Kept for parity with the source taxonomy; the owned-return-value
    /// constructors in this crate make the condition unrepresentable, so no
    /// code path actually produces this variant.
    #[error("value already set")]
    AlreadySet,

    /// Operation called on an uninitialized or already-finalized context.
    ///
    /// Kept for parity with the source taxonomy; this crate's `Hasher`
    /// contexts make "uninitialized" unrepresentable (`init()` always
    /// produces a valid context) and "already finalized" a compile-time
    /// error (`finalize` consumes `self`), so no code path here produces
    /// this variant.
    #[error("missing value: {0}")]
    Missing(String),

    /// Allocation, copy, or clear failed.
    ///
    /// Kept for parity with the source taxonomy; this crate allocates only
    /// through `Vec`/`Box`, which abort the process on allocation failure
    /// rather than returning an error, so no code path here produces this
    /// variant.
    #[error("memory operation failed: {0}")]
    Memory(String),

    /// A sub-step failed during a provider shim's setup.
    ///
    /// Kept for parity with the source taxonomy; this crate ships only the
    /// portable cores and no provider-shim backend, so no code path here
    /// produces this variant.
    #[error("set operation failed: {0}")]
    SetFailed(#[source] Box<CryptoError>),

    /// A sub-step failed during a provider shim's initialization.
    ///
    /// Kept for parity with the source taxonomy, for the same reason as
    /// [`CryptoError::SetFailed`].
    #[error("initialize operation failed: {0}")]
    InitializeFailed(#[source] Box<CryptoError>),

    /// A sub-step failed during a provider shim's finalization.
    ///
    /// Kept for parity with the source taxonomy, for the same reason as
    /// [`CryptoError::SetFailed`].
    #[error("finalize operation failed: {0}")]
    FinalizeFailed(#[source] Box<CryptoError>),

    /// CCM tag mismatch on decrypt. The decryption output buffer must not be
    /// treated as valid plaintext after this error.
    #[error("authentication failed: tag mismatch")]
    AuthenticationFailed,
}

impl CryptoError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
