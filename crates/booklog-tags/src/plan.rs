//! Tag plans
//!
//! The booklog tag endpoint replaces the whole tag set, so every plan
//! carries the complete sequence to write, never a delta.

use crate::operation::is_location_tag;

/// Outcome of reconciling a record's current tags with a requested change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The record already carries the requested tag
    NoChangeNeeded,
    /// Replace the record's tags with this sequence
    Write(Vec<String>),
}

/// Plan adding `new_tag` to `current`
///
/// Existing tags keep their order and the new tag goes last. An exact
/// match anywhere in `current` means nothing needs to be written.
#[must_use]
pub fn plan_add_tag(current: &[String], new_tag: &str) -> Plan {
    if current.iter().any(|tag| tag == new_tag) {
        return Plan::NoChangeNeeded;
    }

    let mut tags = current.to_vec();
    tags.push(new_tag.to_string());
    Plan::Write(tags)
}

/// Plan making `new_location` the record's location tag
///
/// `current` is scanned once and split into three groups: tags equal to
/// `new_location`, other `loc_` tags, and everything else.
///
/// - `new_location` already present: nothing to write.
/// - Another `loc_` tag present: the non-location tags are kept in order and
///   `new_location` is appended. Every other `loc_` tag is dropped.
/// - No `loc_` tag at all: `new_location` is appended to `current` as is.
///
/// The last two branches build their result from different sources. With no
/// `loc_` tag and no `new_location` in `current`, the kept tags equal
/// `current`, so both branches yield the same sequence.
#[must_use]
pub fn plan_set_location(current: &[String], new_location: &str) -> Plan {
    let mut already_set = false;
    let mut other_location = false;
    let mut kept = Vec::with_capacity(current.len() + 1);

    for tag in current {
        if tag == new_location {
            already_set = true;
        } else if is_location_tag(tag) {
            other_location = true;
        } else {
            kept.push(tag.clone());
        }
    }

    if already_set {
        return Plan::NoChangeNeeded;
    }

    if other_location {
        kept.push(new_location.to_string());
        Plan::Write(kept)
    } else {
        let mut tags = current.to_vec();
        tags.push(new_location.to_string());
        Plan::Write(tags)
    }
}
