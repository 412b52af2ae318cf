//! Selective state encryption for persisted app state
//!
//! Intercepts every state slice on its way to durable storage and back so
//! that PHI-bearing slices (mood logs, journal entries, chat transcripts,
//! clinical assessments, identity) are never written in plaintext, while
//! everything else passes through untouched.
//!
//! ## Behavior
//!
//! - **Classification**: a static allow-list decides which slices are sensitive
//! - **Envelope**: encrypted slices are stored as a versioned JSON wrapper
//! - **Fallback**: a failed encrypt stores plaintext (and warns) rather than
//!   refusing to save the user's data
//! - **Discard**: an undecryptable or version-unrecognized envelope resets
//!   that one slice to its default state, never crashing the app
//! - **Capability seams**: the cipher and the log sink are traits, swappable
//!   for platform-backed implementations and test fakes

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cipher;
pub mod classifier;
pub mod envelope;
pub mod error;
pub mod logger;
pub mod registration;
pub mod transform;

pub use cipher::{MockCipher, SliceCipher};
pub use classifier::{SliceClassifier, SENSITIVE_SLICES};
pub use envelope::{EncryptedEnvelope, ENVELOPE_VERSION, SUPPORTED_VERSIONS};
pub use error::{Error, Result};
pub use logger::{LogLevel, LogRecord, MemoryLogger, TracingLogger, TransformLogger};
pub use registration::{verify_whitelist, TransformRegistration};
pub use transform::StateTransform;
