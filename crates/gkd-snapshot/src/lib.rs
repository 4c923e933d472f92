#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Frozen node trees for running selectors offline.
//!
//! A snapshot is the JSON dump of an accessibility tree taken on a device:
//! a flat `nodes` array where every record names its parent by index.
//!
//! ```
//! use gkd_selector::Selector;
//! use gkd_snapshot::Snapshot;
//!
//! let snapshot = Snapshot::from_json(r#"{"nodes": [
//!     {"id": 0, "pid": -1, "attr": {"name": "FrameLayout"}},
//!     {"id": 1, "pid": 0, "attr": {"name": "TextView", "text": "跳过"}}
//! ]}"#).unwrap();
//!
//! let selector = Selector::compile("FrameLayout > TextView[text='跳过']").unwrap();
//! let found = selector.match_first(&snapshot.root(), &snapshot);
//! assert_eq!(found.map(|id| id.index()), Some(1));
//! ```

mod adapter;
mod json;
mod tree;


pub use json::SnapshotError;
pub use tree::{Node, NodeId, Snapshot};
