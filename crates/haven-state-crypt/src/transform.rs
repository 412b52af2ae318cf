//! The persist/rehydrate transform
//!
//! The persistence engine calls [`StateTransform::on_persist`] before
//! writing each slice and [`StateTransform::on_rehydrate`] after reading it
//! back. Both entry points are pure and synchronous apart from logging:
//! every call receives its full input and returns its full output, with no
//! state retained between cycles, so the engine may invoke them for any
//! number of slices concurrently and in any interleaving.

use crate::cipher::SliceCipher;
use crate::classifier::SliceClassifier;
use crate::envelope::EncryptedEnvelope;
use crate::logger::{TracingLogger, TransformLogger};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// Selective encryption transform applied to every persisted state slice.
pub struct StateTransform {
    cipher: Arc<dyn SliceCipher>,
    logger: Arc<dyn TransformLogger>,
    classifier: SliceClassifier,
}

impl StateTransform {
    /// Transform over the default classifier and `tracing` logging.
    pub fn new(cipher: Arc<dyn SliceCipher>) -> Self {
        Self::with_parts(cipher, Arc::new(TracingLogger), SliceClassifier::new())
    }

    /// Transform with explicit collaborators.
    pub fn with_parts(
        cipher: Arc<dyn SliceCipher>,
        logger: Arc<dyn TransformLogger>,
        classifier: SliceClassifier,
    ) -> Self {
        Self {
            cipher,
            logger,
            classifier,
        }
    }

    /// The classifier this transform encrypts by.
    pub fn classifier(&self) -> &SliceClassifier {
        &self.classifier
    }

    /// Transform a slice on its way to durable storage.
    ///
    /// Non-sensitive slices pass through untouched. Sensitive slices come
    /// back as an [`EncryptedEnvelope`] value. A failed encrypt falls back
    /// to returning the plaintext unchanged, with a warning naming the
    /// slice: availability over confidentiality, a deliberate residual risk,
    /// since refusing to save would lose the user's data outright.
    ///
    /// Never panics and always returns a storable value.
    pub fn on_persist(&self, value: Value, slice: &str) -> Value {
        if !self.classifier.is_sensitive(slice) {
            return value;
        }

        let sealed: Result<Value> = self
            .cipher
            .encrypt(&value)
            .ok_or_else(|| Error::Encryption(slice.to_string()))
            .and_then(|ciphertext| EncryptedEnvelope::seal(slice, ciphertext).into_value());

        match sealed {
            Ok(stored) => stored,
            Err(err) => {
                self.logger.warn(slice, &format!("storing plaintext: {err}"));
                value
            }
        }
    }

    /// Transform a stored value on its way back into memory.
    ///
    /// Returns `None` when the slice must be reset to its default state:
    /// undecryptable ciphertext, an unrecognized envelope version, a
    /// slice-name mismatch, or a malformed envelope. Raw (non-envelope)
    /// values pass through untouched, which covers non-sensitive slices and
    /// data written before encryption was introduced.
    ///
    /// Never panics; ciphertext is never returned to the caller.
    pub fn on_rehydrate(&self, stored: Value, slice: &str) -> Option<Value> {
        if !EncryptedEnvelope::is_envelope(&stored) {
            return Some(stored);
        }

        let opened: Result<Value> = EncryptedEnvelope::open(&stored, slice).and_then(|envelope| {
            self.cipher
                .decrypt(&envelope.data)
                .ok_or_else(|| Error::Decryption(slice.to_string()))
        });

        match opened {
            Ok(plain) => Some(plain),
            Err(err) => {
                self.logger.error(slice, &format!("discarding slice: {err}"));
                None
            }
        }
    }
}
