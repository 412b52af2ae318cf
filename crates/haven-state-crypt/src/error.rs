//! Error types

/// Transform errors
///
/// None of these are fatal to the application: the persist and rehydrate
/// entry points degrade to plaintext pass-through or a discarded slice and
/// log instead of propagating. `Error` values surface only from the envelope
/// codec and the startup whitelist check.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Encryption failed for a slice (persist path)
    #[error("Encryption failed for slice '{0}'")]
    Encryption(String),

    /// Decryption failed for a slice (rehydrate path)
    #[error("Decryption failed for slice '{0}'")]
    Decryption(String),

    /// Envelope marked encrypted but missing or empty ciphertext
    #[error("Malformed envelope for slice '{0}'")]
    MalformedEnvelope(String),

    /// Envelope version not recognized by this build
    #[error("Unsupported envelope version '{version}' for slice '{slice}'")]
    UnsupportedVersion {
        /// Slice the envelope was read for
        slice: String,
        /// Version tag found in the envelope
        version: String,
    },

    /// Embedded slice name disagrees with the key the store asked for
    #[error("Slice mismatch: envelope says '{found}', store asked for '{expected}'")]
    SliceMismatch {
        /// Key the persistence engine invoked the transform with
        expected: String,
        /// Slice name embedded in the envelope
        found: String,
    },

    /// Registration whitelist disagrees with the classifier's slice set
    #[error("Whitelist mismatch: {0}")]
    WhitelistMismatch(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
