//! Thin binary wrapper for local development.
//!
//! Project direction: `cosmodeck` is primarily a **library**. This binary
//! exists only to preserve the convenience of `cargo run`.
//!
//! Run:
//! - `cargo run`
//! - `RUST_LOG=cosmodeck=debug cargo run` for navigation/input tracing.

fn main() -> anyhow::Result<()> {
    // Keep logging setup in the binary so the library remains unopinionated.
    env_logger::init();

    cosmodeck::run_app()
}
