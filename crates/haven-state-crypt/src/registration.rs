//! Persistence-engine registration
//!
//! The generic persistence engine consumes a whitelist of slice keys plus
//! the two transform hooks. The whitelist here is derived from the
//! transform's own classifier, so there is one source of truth; when a
//! deployment carries an externally-configured copy instead,
//! [`verify_whitelist`] catches drift once at startup rather than letting a
//! slice slip through unencrypted.

use crate::classifier::SliceClassifier;
use crate::transform::StateTransform;
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Registration handed to the persistence engine.
///
/// The engine invokes `engine.on_persist` before writing and
/// `engine.on_rehydrate` after reading, for every key in `whitelist`.
pub struct TransformRegistration {
    /// Slice keys the persistence engine must invoke the transform for.
    pub whitelist: Vec<String>,
    /// The transform whose hooks the engine calls.
    pub engine: Arc<StateTransform>,
}

impl TransformRegistration {
    /// Registration whose whitelist is derived from the transform's
    /// classifier.
    pub fn new(engine: Arc<StateTransform>) -> Self {
        let whitelist = engine
            .classifier()
            .slice_names()
            .map(str::to_string)
            .collect();
        Self { whitelist, engine }
    }
}

/// Check an externally-configured whitelist against the classifier's set.
///
/// A mismatch is a configuration error, not a runtime one: a slice listed
/// only on the store side would be handed to the transform and passed
/// through unencrypted, and a slice listed only on the classifier side
/// would never reach it at all.
pub fn verify_whitelist<S: AsRef<str>>(
    whitelist: &[S],
    classifier: &SliceClassifier,
) -> Result<()> {
    let configured: BTreeSet<&str> = whitelist.iter().map(AsRef::as_ref).collect();
    let expected: BTreeSet<&str> = classifier.slice_names().collect();

    if configured == expected {
        return Ok(());
    }

    let missing: Vec<&str> = expected.difference(&configured).copied().collect();
    let unexpected: Vec<&str> = configured.difference(&expected).copied().collect();
    Err(Error::WhitelistMismatch(format!(
        "missing from store whitelist: {missing:?}, not classified sensitive: {unexpected:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::MockCipher;
    use crate::classifier::SENSITIVE_SLICES;

    #[test]
    fn test_derived_whitelist_matches_classifier() {
        let engine = Arc::new(StateTransform::new(Arc::new(MockCipher::new())));
        let registration = TransformRegistration::new(engine);

        let mut expected: Vec<String> =
            SENSITIVE_SLICES.iter().map(|s| s.to_string()).collect();
        expected.sort_unstable();
        assert_eq!(registration.whitelist, expected);

        verify_whitelist(&registration.whitelist, registration.engine.classifier())
            .unwrap();
    }

    #[test]
    fn test_verify_rejects_drifted_whitelist() {
        let classifier = SliceClassifier::new();

        // "journal" dropped, "theme" wrongly added
        let drifted: Vec<&str> = SENSITIVE_SLICES
            .iter()
            .copied()
            .filter(|s| *s != "journal")
            .chain(["theme"])
            .collect();

        let err = verify_whitelist(&drifted, &classifier).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("journal"));
        assert!(message.contains("theme"));
    }

    #[test]
    fn test_verify_accepts_any_order() {
        let classifier = SliceClassifier::new();
        let mut reversed: Vec<&str> = SENSITIVE_SLICES.to_vec();
        reversed.reverse();

        verify_whitelist(&reversed, &classifier).unwrap();
    }
}
