//! `cosmodeck` library crate root.
//!
//! An animated, navigable "cosmic zoom" slide deck: a camera flies through
//! nested 3D scenes (city → earth → solar → galaxy → universe) while overlay
//! content tracks the current slide. The architectural core is the
//! slide-transition orchestration: a tick-driven state machine with strict
//! single-flight semantics, input normalization across keyboard/wheel/touch,
//! per-slide camera choreography, and derived segment mount planning.
//!
//! This crate is intended to be used primarily as a **library**. The binary
//! target stays thin and calls into these exported entrypoints.
//!
//! Public API philosophy:
//! - Keep modules public so downstream apps can assemble their own decks
//!   (content tables, segment units, scroll probes).
//! - Provide one stable entrypoint (`run_app`) that runs the built-in demo
//!   deck and doubles as bring-up for integration work.
//!
//! The navigation core (`nav`, `camera`, `segments`, `overlay`) has no GPU
//! or windowing dependencies in its logic and is driven entirely by
//! `tick(dt)` calls, so it is directly testable and usable from headless
//! automation (step slides via `nav::Navigator::request_go_to`).

pub mod camera;
pub mod deck;
pub mod nav;
pub mod overlay;
pub mod render;
pub mod segments;

/// Run the winit/wgpu deck application with the built-in demo deck.
///
/// Note: this function does **not** initialize logging; callers decide their
/// own logging setup.
pub fn run_app() -> anyhow::Result<()> {
    render::app::run_with_builder(render::app::AppConfig::default(), |window| async move {
        render::deck_state::DeckState::new(window).await
    })
}
