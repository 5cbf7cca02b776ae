//! Per-file three-way resolution
//!
//! Given the blob bound to a file at the split point, at the current tip,
//! and at the given tip, decide what the merged working tree does with the
//! file. Sides that changed win over sides that did not; two different
//! changes conflict and get the literal marker envelope.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

/// Outcome of three-way resolution for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Keep whatever the current tip has (file or absence)
    Unchanged,
    /// Write the given side's blob and stage the file
    TakeGiven(ObjectId),
    /// Delete the working file and stage its removal
    Remove,
    /// Both sides changed differently; synthesize conflict markers
    Conflict,
}

/// Decide the action for one file from its three snapshot bindings
///
/// `split`, `current`, and `given` are the blob ids bound to the file at
/// the split point S, current tip X, and given tip Y, absent entries as
/// None.
pub fn resolve(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Resolution {
    // Identical on both sides, including deleted on both sides.
    if current == given {
        return Resolution::Unchanged;
    }

    match split {
        Some(split) => {
            if current == Some(split) {
                // Only the given side diverged from the split point.
                match given {
                    Some(given) => Resolution::TakeGiven(given.clone()),
                    None => Resolution::Remove,
                }
            } else if given == Some(split) {
                // Only the current side diverged; keep it as is.
                Resolution::Unchanged
            } else {
                Resolution::Conflict
            }
        }
        None => match (current, given) {
            (None, Some(given)) => Resolution::TakeGiven(given.clone()),
            (Some(_), None) => Resolution::Unchanged,
            (Some(_), Some(_)) => Resolution::Conflict,
            (None, None) => Resolution::Unchanged,
        },
    }
}

/// Synthesize the conflict-marker envelope for a file
///
/// A deleted side contributes empty contents. Each non-empty side gets a
/// trailing newline iff it does not already end with one, so the markers
/// always sit on their own lines.
pub fn conflict_envelope(current: &[u8], given: &[u8]) -> Bytes {
    let mut merged = Vec::with_capacity(current.len() + given.len() + 32);

    merged.extend_from_slice(b"<<<<<<< HEAD\n");
    push_side(&mut merged, current);
    merged.extend_from_slice(b"=======\n");
    push_side(&mut merged, given);
    merged.extend_from_slice(b">>>>>>>\n");

    Bytes::from(merged)
}

fn push_side(merged: &mut Vec<u8>, side: &[u8]) {
    merged.extend_from_slice(side);
    if !side.is_empty() && !side.ends_with(b"\n") {
        merged.push(b'\n');
    }
}
