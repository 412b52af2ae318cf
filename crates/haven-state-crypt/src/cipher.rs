//! Encryption capability seam
//!
//! The transform never touches key material or cipher internals; it talks
//! to a [`SliceCipher`] supplied by the embedding application (platform
//! keystore, hardware-backed crypto). Failure is `None`, never a panic,
//! so a broken cipher degrades to the transform's fallback paths instead
//! of taking persistence down.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Synchronous encryption collaborator for slice payloads.
///
/// Implementations must be callable from any thread and must report failure
/// as `None` rather than panicking across the boundary. Latency is the
/// implementation's concern; callers treat both operations as bounded,
/// synchronous CPU work.
pub trait SliceCipher: Send + Sync {
    /// Encrypt a JSON-serializable slice value into opaque ciphertext.
    fn encrypt(&self, plain: &Value) -> Option<String>;

    /// Decrypt ciphertext back into the original slice value.
    fn decrypt(&self, ciphertext: &str) -> Option<Value>;
}

/// Deterministic, reversible cipher fake for tests and dev builds.
///
/// "Ciphertext" is the base64 of the JSON encoding. Not cryptography —
/// the point is a collaborator whose success, failure, and call counts
/// the tests can control and observe.
#[derive(Debug, Default)]
pub struct MockCipher {
    fail_encrypt: AtomicBool,
    fail_decrypt: AtomicBool,
    encrypt_calls: AtomicUsize,
    decrypt_calls: AtomicUsize,
}

impl MockCipher {
    /// Cipher that succeeds on every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cipher whose `encrypt` always fails.
    pub fn failing_encrypt() -> Self {
        let cipher = Self::new();
        cipher.set_fail_encrypt(true);
        cipher
    }

    /// Cipher whose `decrypt` always fails.
    pub fn failing_decrypt() -> Self {
        let cipher = Self::new();
        cipher.set_fail_decrypt(true);
        cipher
    }

    /// Toggle encrypt failure injection.
    pub fn set_fail_encrypt(&self, fail: bool) {
        self.fail_encrypt.store(fail, Ordering::SeqCst);
    }

    /// Toggle decrypt failure injection.
    pub fn set_fail_decrypt(&self, fail: bool) {
        self.fail_decrypt.store(fail, Ordering::SeqCst);
    }

    /// Number of `encrypt` calls observed, including failed ones.
    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }

    /// Number of `decrypt` calls observed, including failed ones.
    pub fn decrypt_calls(&self) -> usize {
        self.decrypt_calls.load(Ordering::SeqCst)
    }
}

impl SliceCipher for MockCipher {
    fn encrypt(&self, plain: &Value) -> Option<String> {
        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_encrypt.load(Ordering::SeqCst) {
            return None;
        }
        let encoded = serde_json::to_string(plain).ok()?;
        Some(BASE64.encode(encoded))
    }

    fn decrypt(&self, ciphertext: &str) -> Option<Value> {
        self.decrypt_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_decrypt.load(Ordering::SeqCst) {
            return None;
        }
        let bytes = BASE64.decode(ciphertext).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        serde_json::from_str(&text).ok()
    }
}
