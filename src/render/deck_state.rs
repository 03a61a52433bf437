//! The deck's `AppState`: wires navigator, input, camera, segments, and
//! overlay into the per-frame render callback.
//!
//! Single-writer cooperative model: every mutable piece (navigation state,
//! overscroll accumulator, orbit timer, unit animation clocks) is owned here
//! and mutated only from discrete input events and the per-frame tick.
//! Nothing blocks; "waiting" is a deadline checked next frame.

use std::sync::Arc;
use std::time::Instant;

use glam::{Mat4, Vec3, Vec4Swizzles};
use log::{debug, info};
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::PhysicalKey;
use winit::window::Window;

use crate::camera::CameraRig;
use crate::deck::content::demo_deck;
use crate::deck::ContentStore;
use crate::nav::input::{InputNormalizer, NavIntent};
use crate::nav::{NavConfig, Navigator};
use crate::overlay::{self, FieldKind, NoOverlayScroll, ScrollProbe};
use crate::render::app::AppState;
use crate::render::gpu::Gpu;
use crate::render::primitives::{QuadBatch, Rgba};
use crate::render::quad_renderer::QuadRenderer;
use crate::segments::{self, Billboard, Segment, SegmentUnit, segment_of};

/// Seconds for the cross-segment fade-to-black to clear.
const FADE_SECS: f32 = 0.5;

/// Overscroll units per wheel "line" (trackpads report pixels directly).
const LINE_SCROLL_UNITS: f32 = 20.0;

/// Clamp on frame delta so a stall doesn't teleport springs and timers.
const MAX_FRAME_SECS: f32 = 0.25;

const CAMERA_NEAR: f32 = 0.01;
const CAMERA_FAR: f32 = 10_000.0;

pub struct DeckState {
    window: Arc<Window>,
    gpu: Gpu,
    quads: QuadRenderer,

    nav: Navigator,
    input: InputNormalizer,
    rig: CameraRig,
    content: ContentStore,
    probe: Box<dyn ScrollProbe>,

    /// Live unit instances, reconciled against the mount planner on every
    /// slide change. Instances that stay mounted keep their internal clocks.
    units: Vec<Box<dyn SegmentUnit>>,

    /// Cross-segment fade overlay opacity, 1 → 0.
    fade: f32,

    // Reused per-frame scratch.
    batch: QuadBatch,
    billboards: Vec<Billboard>,

    epoch: Instant,
    last_frame: Instant,
    cursor: (f64, f64),
}

impl DeckState {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let gpu = Gpu::new(window.clone()).await?;
        let quads = QuadRenderer::new(&gpu)?;

        let nav = Navigator::new(NavConfig::default());
        let content = demo_deck();
        debug_assert_eq!(
            content.len(),
            nav.config().total_slides,
            "content table and navigator disagree on the slide count"
        );

        let start = nav.current_slide();
        let mut state = Self {
            window,
            gpu,
            quads,
            nav,
            input: InputNormalizer::new(),
            rig: CameraRig::new(start),
            content,
            probe: Box::new(NoOverlayScroll),
            units: Vec::new(),
            fade: 0.0,
            batch: QuadBatch::new(),
            billboards: Vec::new(),
            epoch: Instant::now(),
            last_frame: Instant::now(),
            cursor: (0.0, 0.0),
        };
        state.reconcile_mounts(start);
        Ok(state)
    }

    /// Direct access to the state machine, for automation drivers stepping
    /// through slides programmatically. Behaves identically to human input
    /// (idempotent/ignorable mid-transition).
    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.nav
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn apply_intent(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::Advance => self.nav.advance(),
            NavIntent::Retreat => self.nav.retreat(),
        };
    }

    /// Rebuild the live unit list from the mount planner's derived set.
    ///
    /// Units surviving the reconcile keep their instance (and animation
    /// clock); units out of the set drop immediately.
    fn reconcile_mounts(&mut self, slide: usize) {
        let set = segments::mount_set(slide);
        self.units.retain(|unit| set.contains(unit.segment()));
        for segment in set.iter() {
            if !self.units.iter().any(|u| u.segment() == segment) {
                self.units.push(segments::build_unit(segment));
            }
        }
        debug!(
            "mounts: slide {slide} -> {:?}",
            set.iter().collect::<Vec<_>>()
        );
    }

    /// Project world-space billboards into NDC quads.
    fn push_billboards(batch: &mut QuadBatch, billboards: &[Billboard], view_proj: Mat4, proj: Mat4) {
        for b in billboards {
            let clip = view_proj * b.position.extend(1.0);
            if clip.w <= CAMERA_NEAR {
                continue;
            }
            let ndc = clip.xyz() / clip.w;
            if !(0.0..=1.0).contains(&ndc.z) {
                continue;
            }

            // Perspective scale: projection diagonal over clip w.
            let half_w = (b.size * 0.5) * proj.x_axis.x / clip.w;
            let half_h = (b.size * 0.5) * proj.y_axis.y / clip.w;
            batch.push_rect([ndc.x, ndc.y], [half_w, half_h], b.color);
        }
    }

    /// Translucent stand-in strips for the overlay text fields, driven by
    /// the real visibility resolver so continuity is observable on screen.
    fn push_overlay_fields(&mut self) {
        let slide = self.nav.current_slide();
        let state = self.nav.transition_state();
        let data = self.nav.transition_data();
        let content = self.content.content_of(slide).clone();

        let strips: [(FieldKind, f32, f32, f32); 4] = [
            (FieldKind::Header, 0.82, 0.55, 0.07),
            (FieldKind::Title, 0.25, 0.7, 0.12),
            (FieldKind::Subtitle, -0.05, 0.6, 0.06),
            (FieldKind::Footer, -0.88, 0.4, 0.04),
        ];

        for (kind, y, half_w, half_h) in strips {
            let present = match kind {
                FieldKind::Header => content.header.is_some(),
                FieldKind::Title => content.title.is_some(),
                FieldKind::Subtitle => content.subtitle.is_some(),
                FieldKind::Footer => content.footer.is_some(),
            };
            if !present {
                continue;
            }
            if !overlay::field_visible(&self.content, slide, state, data.as_ref(), kind) {
                continue;
            }

            let alpha = if kind == FieldKind::Subtitle && content.subtitle_boxed {
                0.28
            } else {
                0.18
            };
            self.batch
                .push_rect([0.0, y], [half_w, half_h], Rgba::WHITE.with_alpha(alpha));
        }
    }

    fn tick_frame(&mut self, dt: f32) {
        if let Some(flip) = self.nav.tick(dt) {
            // One slide change: reset input momentum, repoint the camera,
            // re-derive the mount set, and trigger the fade if the segment
            // actually changed (Galaxy -> Universe is fade-exempt).
            self.input.reset_overscroll();
            self.rig.set_slide(flip.to);
            self.reconcile_mounts(flip.to);

            let from_segment = segment_of(flip.from);
            let to_segment = segment_of(flip.to);
            if from_segment != to_segment
                && !(from_segment == Segment::Galaxy && to_segment == Segment::Universe)
            {
                self.fade = 1.0;
            }

            let (current, total) = self.nav.progress();
            info!("slide {:02} / {:02}", current + 1, total);
        }

        self.fade = (self.fade - dt / FADE_SECS).max(0.0);

        let current = self.nav.current_slide();
        let active = segment_of(current);
        for unit in &mut self.units {
            let visible = unit.segment() == active;
            unit.update(current, visible, dt);
        }
    }
}

impl AppState for DeckState {
    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    fn input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key
                    && let Some(intent) = InputNormalizer::intent_for_key(code)
                {
                    self.apply_intent(intent);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit's y is positive scrolling up; the accumulator wants
                // positive = down (the advance direction).
                let delta_down = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_SCROLL_UNITS,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                let region = self.probe.region_at(self.cursor.0, self.cursor.1);
                let now_ms = self.now_ms();
                if let Some(intent) = self.input.on_wheel(delta_down, now_ms, region) {
                    self.apply_intent(intent);
                }
            }
            WindowEvent::Touch(touch) => {
                let y = touch.location.y as f32;
                let now_ms = self.now_ms();
                match touch.phase {
                    TouchPhase::Started => {
                        let region = self.probe.region_at(touch.location.x, touch.location.y);
                        self.input.on_touch_start(y, now_ms, region);
                    }
                    TouchPhase::Moved => {
                        // The built-in overlay has nothing to scroll; the
                        // consume flag matters for embedders with their own
                        // scrollable overlay.
                        let _ = self.input.on_touch_move(y);
                    }
                    TouchPhase::Ended => {
                        if let Some(intent) = self.input.on_touch_end(y, now_ms) {
                            self.apply_intent(intent);
                        }
                    }
                    TouchPhase::Cancelled => self.input.on_touch_cancel(),
                }
            }
            _ => {}
        }
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_SECS);
        self.last_frame = now;

        self.tick_frame(dt);
        let pose = self.rig.tick(dt);

        // Build this frame's quads: billboards back-to-front by push order,
        // then overlay strips, then the fade quad on top.
        let proj = Mat4::perspective_rh(
            pose.fov.to_radians(),
            self.gpu.aspect(),
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        let view = Mat4::look_at_rh(pose.position, pose.target, Vec3::Y);
        let view_proj = proj * view;

        self.batch.clear();
        self.billboards.clear();
        let current = self.nav.current_slide();
        let active = segment_of(current);
        let backdrop = match self.units.iter().find(|u| u.segment() == active) {
            Some(unit) => {
                unit.emit(current, &mut self.billboards);
                unit.backdrop()
            }
            None => Rgba::BLACK,
        };
        Self::push_billboards(&mut self.batch, &self.billboards, view_proj, proj);
        self.push_overlay_fields();
        if self.fade > 0.0 {
            self.batch.push_fullscreen(Rgba::BLACK.with_alpha(self.fade));
        }

        // Acquire frame (handle recoverable surface errors).
        let (surface_texture, view) = match self.gpu.acquire_frame() {
            Ok(v) => v,
            Err(wgpu::SurfaceError::Outdated) | Err(wgpu::SurfaceError::Lost) => {
                self.gpu.resize(self.gpu.size);
                self.request_redraw();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                self.request_redraw();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(anyhow::anyhow!("wgpu SurfaceError::OutOfMemory"));
            }
            Err(wgpu::SurfaceError::Other) => {
                self.gpu.resize(self.gpu.size);
                self.request_redraw();
                return Ok(());
            }
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Deck Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Deck Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: backdrop.r as f64,
                            g: backdrop.g as f64,
                            b: backdrop.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            self.quads.draw(&self.gpu, &mut pass, &self.batch);
        }

        self.gpu.queue.submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        surface_texture.present();

        // Continuous animation: always ask for the next frame.
        self.request_redraw();
        Ok(())
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
