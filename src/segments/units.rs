//! The five concrete segment units.
//!
//! These are deliberately sparse: each unit is a handful of animated
//! billboards that give the camera moves something to parallax against.
//! Real scene content (geometry, shaders, textures) is an external
//! collaborator; what is binding here is the `SegmentUnit` contract and the
//! visibility gating of per-frame animation.

use glam::Vec3;

use super::{Billboard, Segment, SegmentUnit};
use crate::render::primitives::Rgba;

/// Cheap deterministic hash → [0, 1). Good enough for scattering props.
#[inline]
fn hash01(n: u32) -> f32 {
    let mut x = n.wrapping_mul(0x9E37_79B9).wrapping_add(0x85EB_CA6B);
    x ^= x >> 15;
    x = x.wrapping_mul(0x2C1B_3C6D);
    x ^= x >> 12;
    (x & 0x00FF_FFFF) as f32 / 0x0100_0000 as f32
}

/// Street grid of building blocks; windows flicker slowly at night.
pub struct CityUnit {
    time: f32,
}

impl CityUnit {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }
}

impl SegmentUnit for CityUnit {
    fn segment(&self) -> Segment {
        Segment::City
    }

    fn update(&mut self, _current_slide: usize, visible: bool, dt: f32) {
        if !visible {
            return;
        }
        self.time += dt;
    }

    fn backdrop(&self) -> Rgba {
        Rgba::new(0.016, 0.016, 0.063, 1.0)
    }

    fn emit(&self, current_slide: usize, out: &mut Vec<Billboard>) {
        // The aerial slide (1) reads better with dimmer, denser blocks.
        let aerial = current_slide == 1;
        let glow = if aerial { 0.35 } else { 0.55 };

        for i in 0..48u32 {
            let gx = (i % 8) as f32 - 3.5;
            let gz = (i / 8) as f32 - 2.5;
            let height = 2.0 + hash01(i) * 6.0;
            let flicker = 0.85 + 0.15 * (self.time * (0.5 + hash01(i * 7)) + i as f32).sin();

            out.push(Billboard {
                position: Vec3::new(gx * 6.0, height * 0.5, gz * 6.0),
                size: 1.5 + hash01(i * 3) * 2.0,
                color: Rgba::new(glow * flicker, glow * 0.8 * flicker, 0.3, 1.0),
            });
        }
    }
}

/// The home planet: a big day-side disc with slowly drifting cloud patches.
pub struct EarthUnit {
    cloud_drift: f32,
}

impl EarthUnit {
    pub fn new() -> Self {
        Self { cloud_drift: 0.0 }
    }
}

impl SegmentUnit for EarthUnit {
    fn segment(&self) -> Segment {
        Segment::Earth
    }

    fn update(&mut self, _current_slide: usize, visible: bool, dt: f32) {
        if !visible {
            return;
        }
        self.cloud_drift += dt * 0.02;
    }

    fn backdrop(&self) -> Rgba {
        Rgba::new(0.004, 0.004, 0.016, 1.0)
    }

    fn emit(&self, _current_slide: usize, out: &mut Vec<Billboard>) {
        out.push(Billboard {
            position: Vec3::ZERO,
            size: 20.0,
            color: Rgba::new(0.16, 0.35, 0.62, 1.0),
        });

        for i in 0..12u32 {
            let angle = hash01(i) * std::f32::consts::TAU + self.cloud_drift;
            let lat = (hash01(i * 5) - 0.5) * 1.6;
            out.push(Billboard {
                position: Vec3::new(angle.cos() * 10.5, lat * 8.0, angle.sin() * 10.5),
                size: 2.0 + hash01(i * 11) * 3.0,
                color: Rgba::new(0.9, 0.92, 0.95, 0.6),
            });
        }
    }
}

/// The sun and a thin planet line. The camera orbits; the sun just burns.
pub struct SolarUnit {
    time: f32,
}

impl SolarUnit {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }
}

impl SegmentUnit for SolarUnit {
    fn segment(&self) -> Segment {
        Segment::Solar
    }

    fn update(&mut self, _current_slide: usize, visible: bool, dt: f32) {
        if !visible {
            return;
        }
        self.time += dt;
    }

    fn backdrop(&self) -> Rgba {
        Rgba::new(0.008, 0.004, 0.012, 1.0)
    }

    fn emit(&self, _current_slide: usize, out: &mut Vec<Billboard>) {
        let pulse = 1.0 + 0.04 * (self.time * 1.7).sin();
        out.push(Billboard {
            position: Vec3::ZERO,
            size: 4.5 * pulse,
            color: Rgba::new(1.0, 0.72, 0.25, 1.0),
        });

        for i in 0..5u32 {
            let radius = 6.0 + i as f32 * 2.5;
            let angle = hash01(i * 13) * std::f32::consts::TAU + self.time * (0.3 / (1 + i) as f32);
            out.push(Billboard {
                position: Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius),
                size: 0.4 + hash01(i) * 0.5,
                color: Rgba::new(0.55, 0.6, 0.75, 1.0),
            });
        }
    }
}

/// A spiral of stars. Rotates imperceptibly, as galaxies do.
pub struct GalaxyUnit {
    spin: f32,
}

impl GalaxyUnit {
    pub fn new() -> Self {
        Self { spin: 0.0 }
    }
}

impl SegmentUnit for GalaxyUnit {
    fn segment(&self) -> Segment {
        Segment::Galaxy
    }

    fn update(&mut self, _current_slide: usize, visible: bool, dt: f32) {
        if !visible {
            return;
        }
        self.spin += dt * 0.01;
    }

    fn backdrop(&self) -> Rgba {
        Rgba::new(0.004, 0.002, 0.012, 1.0)
    }

    fn emit(&self, current_slide: usize, out: &mut Vec<Billboard>) {
        // The cluster slide (9) pulls the camera far out; fewer, brighter arms.
        let arms = if current_slide == 9 { 2 } else { 3 };

        for i in 0..180u32 {
            let t = hash01(i);
            let arm = (i % arms as u32) as f32 / arms as f32;
            let radius = 4.0 + t * 55.0;
            let angle = arm * std::f32::consts::TAU + t * 4.5 + self.spin;
            let warm = 0.6 + 0.4 * hash01(i * 3);

            out.push(Billboard {
                position: Vec3::new(
                    angle.cos() * radius,
                    (hash01(i * 17) - 0.5) * 4.0,
                    angle.sin() * radius,
                ),
                size: 0.5 + t * 1.2,
                color: Rgba::new(warm, warm * 0.9, 1.0, 0.9),
            });
        }
    }
}

/// Distant galaxies as faint smudges. Nothing moves on human timescales.
pub struct UniverseUnit {
    shimmer: f32,
}

impl UniverseUnit {
    pub fn new() -> Self {
        Self { shimmer: 0.0 }
    }
}

impl SegmentUnit for UniverseUnit {
    fn segment(&self) -> Segment {
        Segment::Universe
    }

    fn update(&mut self, _current_slide: usize, visible: bool, dt: f32) {
        if !visible {
            return;
        }
        self.shimmer += dt * 0.1;
    }

    fn backdrop(&self) -> Rgba {
        Rgba::new(0.0, 0.0, 0.006, 1.0)
    }

    fn emit(&self, _current_slide: usize, out: &mut Vec<Billboard>) {
        for i in 0..120u32 {
            let u = hash01(i) * std::f32::consts::TAU;
            let v = hash01(i * 7) * std::f32::consts::PI;
            let radius = 120.0 + hash01(i * 3) * 260.0;
            let fade = 0.3 + 0.2 * (self.shimmer + i as f32 * 0.7).sin().abs();

            out.push(Billboard {
                position: Vec3::new(
                    u.cos() * v.sin() * radius,
                    v.cos() * radius * 0.6,
                    u.sin() * v.sin() * radius,
                ),
                size: 2.0 + hash01(i * 11) * 5.0,
                color: Rgba::new(0.8, 0.75, 0.95, fade),
            });
        }
    }
}
