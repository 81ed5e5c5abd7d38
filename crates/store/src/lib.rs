//! JSON-file story persistence and on-disk output layout.
//!
//! One story is one JSON file; scene assets and rendered videos live in
//! sibling directories. No database is involved.

pub mod error;
pub mod layout;
pub mod story_store;

pub use error::StoreError;
pub use layout::OutputLayout;
pub use story_store::{StoredStory, StoryStore, VideoEntry};
