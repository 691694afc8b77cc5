//! Batch tag operations

use crate::plan::{plan_add_tag, plan_set_location, Plan};
use std::fmt;

/// Prefix that marks a tag as a physical location
pub const LOCATION_PREFIX: &str = "loc_";

/// Check if `tag` is a location marker
#[inline]
#[must_use]
pub fn is_location_tag(tag: &str) -> bool {
    tag.starts_with(LOCATION_PREFIX)
}

/// Build the location tag for a location name
///
/// `location_tag("shelf")` is `"loc_shelf"`. The name is not inspected, so
/// a name that already carries the prefix gets it twice, matching what the
/// `update-location` command has always written.
#[must_use]
pub fn location_tag(name: &str) -> String {
    format!("{LOCATION_PREFIX}{name}")
}

/// Tag mutation applied to every record in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOperation {
    /// Add a plain tag
    AddTag(String),
    /// Replace the record's location marker with `loc_<name>`
    SetLocation(String),
}

impl TagOperation {
    /// The tag this operation writes
    #[must_use]
    pub fn target_tag(&self) -> String {
        match self {
            Self::AddTag(tag) => tag.clone(),
            Self::SetLocation(name) => location_tag(name),
        }
    }

    /// Plan this operation against a record's current tags
    #[must_use]
    pub fn plan(&self, current: &[String]) -> Plan {
        let target = self.target_tag();
        match self {
            Self::AddTag(_) => plan_add_tag(current, &target),
            Self::SetLocation(_) => plan_set_location(current, &target),
        }
    }

    /// Operator message for a successful write
    #[must_use]
    pub fn updated_message(&self) -> &'static str {
        match self {
            Self::AddTag(_) => "Tag added successfully",
            Self::SetLocation(_) => "Location updated successfully",
        }
    }

    /// Operator message when the record already had the tag
    #[must_use]
    pub fn unchanged_message(&self) -> &'static str {
        match self {
            Self::AddTag(_) => "Tag already exists",
            Self::SetLocation(_) => "Location tag already added",
        }
    }
}

impl fmt::Display for TagOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddTag(tag) => write!(f, "add-tag {tag}"),
            Self::SetLocation(name) => write!(f, "update-location {}", location_tag(name)),
        }
    }
}
