//! Commit/apply payload formatting for the epoch-gated dispatcher.
//!
//! The dispatcher owns the epoch counter; this core only formats the
//! payloads it submits and refuses to format one that the dispatcher
//! would reject (non-monotonic epoch, or a jump beyond the maximum
//! single-step increase).

use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Reference to the dispatcher's epoch state at formatting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochRef {
    /// The dispatcher's current epoch.
    pub current: u64,
    /// Maximum permitted single-step epoch increase.
    pub max_step: u64,
}

/// Payload committing a new manifest root at a future epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRootPayload {
    /// The Merkle root being committed.
    pub root: Hash,
    /// Epoch at which the root becomes eligible for activation.
    pub epoch: u64,
}

/// Payload activating a previously committed root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyRootPayload {
    /// Epoch whose committed root becomes active.
    pub epoch: u64,
}

impl CommitRootPayload {
    /// Formats a commit payload, enforcing the dispatcher's epoch bounds.
    pub fn format(root: Hash, epoch: EpochRef, proposed: u64) -> Result<Self, ManifestError> {
        if proposed <= epoch.current {
            return Err(ManifestError::EpochNotMonotonic {
                current: epoch.current,
                proposed,
            });
        }
        let step = proposed - epoch.current;
        if step > epoch.max_step {
            return Err(ManifestError::EpochStepTooLarge {
                from: epoch.current,
                to: proposed,
                max_step: epoch.max_step,
            });
        }
        Ok(Self {
            root,
            epoch: proposed,
        })
    }
}

impl ApplyRootPayload {
    /// Formats an apply payload for a committed epoch.
    #[must_use]
    pub fn format(epoch: u64) -> Self {
        Self { epoch }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPOCH: EpochRef = EpochRef {
        current: 10,
        max_step: 4,
    };

    #[test]
    fn test_commit_within_step_bound() {
        let payload = CommitRootPayload::format(Hash::new([1u8; 32]), EPOCH, 12).unwrap();
        assert_eq!(payload.epoch, 12);
    }

    #[test]
    fn test_commit_rejects_backward_epoch() {
        assert!(matches!(
            CommitRootPayload::format(Hash::ZERO, EPOCH, 10),
            Err(ManifestError::EpochNotMonotonic { .. })
        ));
        assert!(matches!(
            CommitRootPayload::format(Hash::ZERO, EPOCH, 3),
            Err(ManifestError::EpochNotMonotonic { .. })
        ));
    }

    #[test]
    fn test_commit_rejects_oversized_jump() {
        assert!(matches!(
            CommitRootPayload::format(Hash::ZERO, EPOCH, 15),
            Err(ManifestError::EpochStepTooLarge { .. })
        ));
        // boundary: exactly max_step is fine
        assert!(CommitRootPayload::format(Hash::ZERO, EPOCH, 14).is_ok());
    }

    #[test]
    fn test_apply_payload_shape() {
        let payload = ApplyRootPayload::format(12);
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"epoch":12}"#);
    }
}
