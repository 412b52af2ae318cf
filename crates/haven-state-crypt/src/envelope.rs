//! Versioned envelope for encrypted slices
//!
//! The only representation an encrypted slice ever has on durable storage.
//! The field names are part of the on-disk contract: any consumer reading
//! raw storage distinguishes encrypted from plaintext slices by the
//! `_encrypted` marker.
//!
//! Envelopes are ephemeral: built once per persist cycle, never cached,
//! never mutated in place.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope format version written by this build.
pub const ENVELOPE_VERSION: &str = "1.0";

/// Versions this build knows how to open.
///
/// Migration hook point: a future format version is added here together
/// with its upgrade path. Anything not listed is discarded at rehydrate
/// rather than handed to a presumed-incompatible decrypt.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Wrapper persisted in place of a sensitive slice's plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Discriminates an envelope from a raw persisted value; always `true`.
    #[serde(rename = "_encrypted")]
    pub encrypted: bool,

    /// Format version tag.
    #[serde(rename = "_version")]
    pub version: String,

    /// Originating slice name, for diagnostics and mismatch detection.
    #[serde(rename = "_slice")]
    pub slice: String,

    /// Opaque ciphertext.
    pub data: String,
}

impl EncryptedEnvelope {
    /// Wrap ciphertext for a slice at the current format version.
    pub fn seal(slice: &str, ciphertext: String) -> Self {
        Self {
            encrypted: true,
            version: ENVELOPE_VERSION.to_string(),
            slice: slice.to_string(),
            data: ciphertext,
        }
    }

    /// Serialize into the JSON value handed to the persistence engine.
    pub fn into_value(self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Whether a stored value claims to be an envelope.
    ///
    /// Only the `_encrypted: true` marker is consulted. A marked value with
    /// missing or invalid ciphertext is still routed through [`open`] so it
    /// is reported as malformed and discarded instead of leaking back into
    /// memory as-is.
    ///
    /// [`open`]: EncryptedEnvelope::open
    pub fn is_envelope(stored: &Value) -> bool {
        stored.get("_encrypted").and_then(Value::as_bool) == Some(true)
    }

    /// Parse and validate a stored envelope for `slice`.
    ///
    /// Gates run in order: shape, version, embedded slice name, non-empty
    /// ciphertext. The version gate rejects before any decrypt is attempted,
    /// and the embedded name is never trusted for classification.
    pub fn open(stored: &Value, slice: &str) -> Result<Self> {
        let envelope: Self = serde_json::from_value(stored.clone())
            .map_err(|_| Error::MalformedEnvelope(slice.to_string()))?;

        if !SUPPORTED_VERSIONS.contains(&envelope.version.as_str()) {
            return Err(Error::UnsupportedVersion {
                slice: slice.to_string(),
                version: envelope.version,
            });
        }

        if envelope.slice != slice {
            return Err(Error::SliceMismatch {
                expected: slice.to_string(),
                found: envelope.slice,
            });
        }

        if envelope.data.is_empty() {
            return Err(Error::MalformedEnvelope(slice.to_string()));
        }

        Ok(envelope)
    }
}
