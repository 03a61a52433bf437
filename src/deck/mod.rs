//! Deck data model: slide count, slide content records, content lookup.
//!
//! Design goals:
//! - The deck description is plain data. The navigation core only ever
//!   *compares* content fields (for the overlay continuity rule); it never
//!   interprets field semantics.
//! - Every slide index in `0..total_slides` must have a content record and a
//!   segment assignment. A missing entry is a table-authoring bug, not a
//!   runtime condition, and is treated as loud in development
//!   (`debug_assert!`).
//!
//! Non-goals:
//! - Content authoring formats, rich text, media embedding. A field is a
//!   string the renderer may do whatever it wants with.

pub mod content;

pub use content::{ContentStore, Layout, Position, SlideContent};

/// Number of slides in the built-in deck.
pub const TOTAL_SLIDES: usize = 11;

/// The designated sibling pair: two indices that are alternate states of one
/// logical slide. Transitions between them use a fast camera settle because
/// the camera does not actually travel.
pub const SIBLING_PAIR: (usize, usize) = (6, 7);
