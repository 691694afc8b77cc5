//! booklog tag reconciliation
//!
//! Pure decision logic for mutating the tag sequence of a booklog record.
//! Nothing in this crate touches the network: callers fetch the current
//! tags, ask for a [`Plan`], and write the planned sequence back.
//!
//! # Core Concepts
//!
//! - [`Plan`]: either [`Plan::NoChangeNeeded`] or [`Plan::Write`] with the full
//!   replacement sequence
//! - [`plan_add_tag`]: append a tag unless it is already present
//! - [`plan_set_location`]: make `loc_<name>` the record's location marker
//! - [`TagOperation`]: the operation a batch run applies to every record
//!
//! # Example
//!
//! ```rust
//! use booklog_tags::{plan_set_location, Plan};
//!
//! let current = vec!["fiction".to_string(), "loc_attic".to_string()];
//! let plan = plan_set_location(&current, "loc_shelf");
//!
//! assert_eq!(
//!     plan,
//!     Plan::Write(vec!["fiction".to_string(), "loc_shelf".to_string()])
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod operation;
mod plan;

pub use operation::{is_location_tag, location_tag, TagOperation, LOCATION_PREFIX};
pub use plan::{plan_add_tag, plan_set_location, Plan};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
