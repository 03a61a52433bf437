//! winit application lifecycle for the deck.
//!
//! This module owns:
//! - the event loop and window creation
//! - forwarding device events (keys, wheel, touch, cursor) into the state
//! - delegating rendering to an injected async state builder
//!
//! Design:
//! - The runner is generic over a state type `S: AppState` so alternative
//!   decks (or headless automation drivers) can reuse the event-loop
//!   boilerplate with their own state.
//! - The builder is async and receives the created window; it runs on the
//!   current thread via `pollster::block_on`.
//! - Teardown safety: all animation "timers" are deadlines inside the state,
//!   advanced from `render()`. Dropping the state on exit therefore cancels
//!   everything at once; no callback can fire against destroyed state.

use std::{future::Future, pin::Pin, sync::Arc};

use anyhow::Context as _;
use log::info;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

/// App-facing configuration for running the winit event loop.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// ControlFlow for the event loop. `Poll` keeps continuous animation
    /// (springs, orbit) ticking every frame.
    pub control_flow: ControlFlow,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "cosmodeck".to_string(),
            control_flow: ControlFlow::Poll,
        }
    }
}

/// What a deck state must implement to be driven by the runner.
pub trait AppState: 'static {
    /// Handle window resize.
    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>);

    /// Handle a device input event (keyboard, wheel, touch, cursor).
    ///
    /// Default is ignore; render-only states don't have to care.
    fn input(&mut self, event: &WindowEvent) {
        let _ = event;
    }

    /// Render one frame (also where per-frame ticking happens).
    fn render(&mut self) -> anyhow::Result<()>;

    /// Request a redraw on the underlying window (continuous animation).
    fn request_redraw(&self);
}

/// Run the winit event loop with an injected async state builder.
///
/// The builder is called once when the app is resumed, after the window is
/// created.
pub fn run_with_builder<S, B, Fut>(config: AppConfig, builder: B) -> anyhow::Result<()>
where
    S: AppState,
    B: FnOnce(Arc<Window>) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<S>> + 'static,
{
    let event_loop = EventLoop::new().context("winit: failed to create EventLoop")?;
    event_loop.set_control_flow(config.control_flow);

    let mut app = App::<S>::new_with_builder(config, builder);
    event_loop
        .run_app(&mut app)
        .context("winit: run_app failed")?;

    Ok(())
}

/// Type-erased async builder for creating a state `S` from a created window.
///
/// The future is pinned and boxed so `pollster::block_on` can drive it
/// (`dyn Future` is not `Unpin`).
type BoxedStateBuilder<S> = Box<
    dyn FnOnce(Arc<Window>) -> Pin<Box<dyn Future<Output = anyhow::Result<S>> + 'static>> + 'static,
>;

/// Application handler used by winit.
struct App<S: AppState> {
    config: AppConfig,
    builder: Option<BoxedStateBuilder<S>>,
    state: Option<S>,
    exiting: bool,
}

impl<S: AppState> App<S> {
    fn new_with_builder<B, Fut>(config: AppConfig, builder: B) -> Self
    where
        B: FnOnce(Arc<Window>) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<S>> + 'static,
    {
        Self {
            config,
            builder: Some(Box::new(|window| Box::pin(builder(window)))),
            state: None,
            exiting: false,
        }
    }
}

impl<S: AppState> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = Arc::new(
            event_loop
                .create_window(WindowAttributes::default().with_title(self.config.title.as_str()))
                .expect("winit: failed to create window"),
        );

        let builder = self
            .builder
            .take()
            .expect("app state builder can only be consumed once");
        let state = pollster::block_on(builder(window)).expect("failed to initialize deck state");
        self.state = Some(state);

        // Kick off rendering.
        self.state.as_ref().unwrap().request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; exiting");
                self.exiting = true;
                // Dropping the state drops every in-flight deadline with it.
                self.state = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if self.exiting {
                    return;
                }
                state.resize(size);
                state.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if self.exiting {
                    return;
                }
                if let Err(err) = state.render() {
                    info!("render error: {:#}", err);
                }
            }
            WindowEvent::KeyboardInput { .. }
            | WindowEvent::MouseWheel { .. }
            | WindowEvent::Touch(..)
            | WindowEvent::CursorMoved { .. } => {
                if self.exiting {
                    return;
                }
                state.input(&event);
            }
            _ => {}
        }
    }
}
