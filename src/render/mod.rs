//! Rendering module root: window/event-loop integration, the GPU context,
//! and the deck state that drives everything per frame.
//!
//! Current entrypoint: `render::app::run_with_builder(...)` with
//! `DeckState::new` as the builder (see `crate::run_app`).

pub mod app;

/// Common GPU context shared across render submodules.
pub mod gpu;

/// Colors, vertices, and the per-frame quad batch.
pub mod primitives;

/// The one pipeline the deck draws with.
pub mod quad_renderer;

/// The deck's `AppState`: per-frame navigation/camera/segment wiring.
pub mod deck_state;
