//! Camera choreography: the per-slide pose table, the damped spring that
//! carries the camera between poses, and the continuous-orbit override for
//! the solar slides.
//!
//! Pose resolution is pure: `pose_of(slide)` is a hand-authored table (the
//! two low-orbit slides derive their position from a fixed geographic point
//! projected off the planet sphere). Everything stateful lives in
//! `CameraRig`, which integrates the spring and the orbit timer from the
//! per-frame tick.
//!
//! Transition behavior:
//! - Within a segment the springs glide toward the destination pose.
//! - Across segments the rig snaps instantly — the full-screen fade hides
//!   the jump — except Galaxy → Universe, which has no fade and animates.
//! - On the orbit slides the displayed pose blends from the spring pose into
//!   a continuous revolution around the sun, eased in with smoothstep over a
//!   fixed settle window. The orbit timer restarts at zero whenever the
//!   range is entered from outside.

use std::f32::consts::PI;
use std::ops::RangeInclusive;

use glam::Vec3;

use crate::segments::{Segment, segment_of};

/// Planet sphere radius in world units.
pub const EARTH_RADIUS: f32 = 10.0;

/// Slides on which the camera orbits the sun.
pub const ORBIT_SLIDES: RangeInclusive<usize> = 6..=7;

pub const ORBIT_RADIUS: f32 = 11.0;
pub const ORBIT_SPEED: f32 = 0.1;
pub const ORBIT_HEIGHT: f32 = 2.0;
/// Seconds to ease from the static pose into the orbit.
pub const ORBIT_SETTLE_SECS: f32 = 2.0;

/// Look target revolves 90° ahead of the camera at this radius, keeping the
/// sun composed off to the side instead of dead center.
const LOOK_AHEAD_RADIUS: f32 = 3.0;
const LOOK_AHEAD_HEIGHT: f32 = 0.5;

/// Spring constants shared by position, target, and fov.
const SPRING_MASS: f32 = 2.0;
const SPRING_TENSION: f32 = 20.0;
const SPRING_FRICTION: f32 = 24.0;

/// Integration cap: one spring step never exceeds this, long frames are
/// subdivided so the integrator stays stable.
const MAX_SPRING_STEP: f32 = 1.0 / 60.0;

/// Full camera description for one slide.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
}

impl CameraPose {
    #[inline]
    pub const fn new(position: Vec3, target: Vec3, fov: f32) -> Self {
        Self {
            position,
            target,
            fov,
        }
    }
}

/// Unit direction of the ground-truth geographic point (San Francisco,
/// 37.78°N 122.42°W) on the planet sphere. The two low-orbit slides hover
/// over it at different altitudes.
fn anchor_direction() -> Vec3 {
    let phi = (90.0 - 37.78) * (PI / 180.0);
    let theta = (-122.42 + 180.0) * (PI / 180.0);
    Vec3::new(
        -phi.sin() * theta.cos(),
        phi.cos(),
        phi.sin() * theta.sin(),
    )
    .normalize()
}

/// Hand-authored pose for one slide.
///
/// Every slide must have an entry; falling through to the default pose means
/// the table and the deck disagree, which is loud in development.
pub fn pose_of(slide: usize) -> CameraPose {
    match slide {
        // Street-level cover: looking down the avenue toward the bridge.
        0 => CameraPose::new(Vec3::new(-30.0, 4.5, -24.0), Vec3::new(0.0, 2.0, 0.0), 52.0),
        // Aerial city.
        1 => CameraPose::new(Vec3::new(-8.0, 20.0, 8.0), Vec3::new(-2.0, 0.0, -2.0), 52.0),
        // Coastline: anchored over the geographic point, low altitude.
        2 => CameraPose::new(anchor_direction() * (EARTH_RADIUS + 5.0), Vec3::ZERO, 42.0),
        // Continent: same anchor, higher.
        3 => CameraPose::new(anchor_direction() * (EARTH_RADIUS + 9.0), Vec3::ZERO, 50.0),
        // Full planet (two content states share the framing).
        4 | 5 => CameraPose::new(
            Vec3::new(-8.0, 5.0, EARTH_RADIUS + 18.0),
            Vec3::ZERO,
            50.0,
        ),
        // Sun, both sibling states: the static pose the orbit takes over from.
        6 | 7 => CameraPose::new(Vec3::new(6.0, 2.0, 9.0), Vec3::new(4.0, 0.0, 3.0), 48.0),
        // Galaxy.
        8 => CameraPose::new(Vec3::new(8.0, 35.0, 60.0), Vec3::ZERO, 58.0),
        // Clusters.
        9 => CameraPose::new(Vec3::new(40.0, 60.0, 160.0), Vec3::ZERO, 60.0),
        // Universe.
        10 => CameraPose::new(Vec3::new(80.0, 120.0, 380.0), Vec3::ZERO, 62.0),
        _ => {
            debug_assert!(false, "pose_of: slide {slide} has no pose entry");
            CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 60.0)
        }
    }
}

/// Orbit angle matches the static pose position (x=6, z=9) so the blend
/// starts exactly where the spring camera lands.
fn orbit_start_angle() -> f32 {
    9.0f32.atan2(6.0)
}

/// Hermite smoothstep, `3t² − 2t³` on clamped t.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Critically-damped-ish spring on a `Vec3`, semi-implicit Euler.
#[derive(Debug, Copy, Clone)]
struct Spring3 {
    value: Vec3,
    velocity: Vec3,
}

impl Spring3 {
    fn at(value: Vec3) -> Self {
        Self {
            value,
            velocity: Vec3::ZERO,
        }
    }

    fn snap(&mut self, value: Vec3) {
        self.value = value;
        self.velocity = Vec3::ZERO;
    }

    fn tick(&mut self, target: Vec3, dt: f32) {
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(MAX_SPRING_STEP);
            let accel =
                ((target - self.value) * SPRING_TENSION - self.velocity * SPRING_FRICTION)
                    / SPRING_MASS;
            self.velocity += accel * step;
            self.value += self.velocity * step;
            remaining -= step;
        }
    }
}

/// Scalar spring (field of view).
#[derive(Debug, Copy, Clone)]
struct Spring1 {
    value: f32,
    velocity: f32,
}

impl Spring1 {
    fn at(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    fn snap(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }

    fn tick(&mut self, target: f32, dt: f32) {
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(MAX_SPRING_STEP);
            let accel = ((target - self.value) * SPRING_TENSION - self.velocity * SPRING_FRICTION)
                / SPRING_MASS;
            self.velocity += accel * step;
            self.value += self.velocity * step;
            remaining -= step;
        }
    }
}

/// The stateful camera: springs toward the current slide's pose, with the
/// orbit override blended on top for the solar slides.
#[derive(Debug)]
pub struct CameraRig {
    slide: usize,
    position: Spring3,
    target: Spring3,
    fov: Spring1,
    orbit_time: f32,
}

impl CameraRig {
    /// A rig parked exactly on `slide`'s pose.
    pub fn new(slide: usize) -> Self {
        let pose = pose_of(slide);
        Self {
            slide,
            position: Spring3::at(pose.position),
            target: Spring3::at(pose.target),
            fov: Spring1::at(pose.fov),
            orbit_time: 0.0,
        }
    }

    pub fn slide(&self) -> usize {
        self.slide
    }

    /// Seconds spent on the orbit slides since last entering them.
    pub fn orbit_elapsed(&self) -> f32 {
        self.orbit_time
    }

    /// Point the rig at a new slide (called at the slide-flip edge).
    ///
    /// Cross-segment moves snap because the fade-to-black overlay hides the
    /// jump; Galaxy → Universe is exempt (no fade there) and glides instead.
    /// Entering the orbit range from outside restarts the orbit timer.
    pub fn set_slide(&mut self, slide: usize) {
        let from_segment = segment_of(self.slide);
        let to_segment = segment_of(slide);

        let entering_orbit =
            ORBIT_SLIDES.contains(&slide) && !ORBIT_SLIDES.contains(&self.slide);
        if entering_orbit {
            self.orbit_time = 0.0;
        }

        let snap = from_segment != to_segment
            && !(from_segment == Segment::Galaxy && to_segment == Segment::Universe);
        if snap {
            let pose = pose_of(slide);
            self.position.snap(pose.position);
            self.target.snap(pose.target);
            self.fov.snap(pose.fov);
        }

        self.slide = slide;
    }

    /// Advance springs and orbit by `dt` seconds and return the displayed pose.
    pub fn tick(&mut self, dt: f32) -> CameraPose {
        let dest = pose_of(self.slide);
        self.position.tick(dest.position, dt);
        self.target.tick(dest.target, dt);
        self.fov.tick(dest.fov, dt);

        if !ORBIT_SLIDES.contains(&self.slide) {
            return CameraPose::new(self.position.value, self.target.value, self.fov.value);
        }

        self.orbit_time += dt;
        let blend = smoothstep(self.orbit_time / ORBIT_SETTLE_SECS);
        let angle = orbit_start_angle() + self.orbit_time * ORBIT_SPEED;

        let orbit_position = Vec3::new(
            angle.cos() * ORBIT_RADIUS,
            ORBIT_HEIGHT,
            angle.sin() * ORBIT_RADIUS,
        );
        let look_angle = angle + PI * 0.5;
        let orbit_target = Vec3::new(
            look_angle.cos() * LOOK_AHEAD_RADIUS,
            LOOK_AHEAD_HEIGHT,
            look_angle.sin() * LOOK_AHEAD_RADIUS,
        );

        CameraPose::new(
            self.position.value.lerp(orbit_position, blend),
            self.target.value.lerp(orbit_target, blend),
            self.fov.value,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::TOTAL_SLIDES;

    #[test]
    fn every_slide_has_a_pose() {
        for slide in 0..TOTAL_SLIDES {
            let pose = pose_of(slide);
            assert!(pose.fov > 0.0, "slide {slide}");
            assert!(pose.position.is_finite(), "slide {slide}");
        }
    }

    #[test]
    fn anchored_slides_sit_over_the_same_point() {
        let low = pose_of(2);
        let high = pose_of(3);
        assert!((low.position.length() - (EARTH_RADIUS + 5.0)).abs() < 1e-3);
        assert!((high.position.length() - (EARTH_RADIUS + 9.0)).abs() < 1e-3);
        // Same direction, different altitude.
        let cos = low.position.normalize().dot(high.position.normalize());
        assert!(cos > 0.9999);
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(-2.0), 0.0);
        assert_eq!(smoothstep(5.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn orbit_timer_resets_on_entry_from_outside() {
        let mut rig = CameraRig::new(5);
        rig.set_slide(6);
        for _ in 0..120 {
            rig.tick(1.0 / 60.0);
        }
        assert!(rig.orbit_elapsed() > 1.9);

        // Sibling swap stays inside the range: timer keeps running.
        rig.set_slide(7);
        let before = rig.orbit_elapsed();
        rig.tick(1.0 / 60.0);
        assert!(rig.orbit_elapsed() > before);

        // Leave and come back: timer restarts at zero, no matter how long
        // the previous visit lasted.
        rig.set_slide(8);
        rig.set_slide(7);
        assert_eq!(rig.orbit_elapsed(), 0.0);
    }

    #[test]
    fn orbit_blend_starts_on_the_static_pose() {
        let mut rig = CameraRig::new(6);
        // First frame: blend is ~0, so the displayed pose is the spring pose,
        // which is parked on the static table entry.
        let pose = rig.tick(1e-4);
        let table = pose_of(6);
        assert!((pose.position - table.position).length() < 0.05);
        assert!((pose.target - table.target).length() < 0.05);
    }

    #[test]
    fn orbit_revolves_after_settling() {
        let mut rig = CameraRig::new(6);
        for _ in 0..240 {
            rig.tick(1.0 / 60.0);
        }
        let a = rig.tick(1.0 / 60.0);
        for _ in 0..120 {
            rig.tick(1.0 / 60.0);
        }
        let b = rig.tick(1.0 / 60.0);

        // Still on the orbit circle, but at a different angle.
        let ra = Vec3::new(a.position.x, 0.0, a.position.z).length();
        let rb = Vec3::new(b.position.x, 0.0, b.position.z).length();
        assert!((ra - ORBIT_RADIUS).abs() < 0.1);
        assert!((rb - ORBIT_RADIUS).abs() < 0.1);
        assert!((a.position - b.position).length() > 0.1);
        assert!((a.position.y - ORBIT_HEIGHT).abs() < 0.05);
    }

    #[test]
    fn cross_segment_move_snaps() {
        let mut rig = CameraRig::new(1); // City
        rig.set_slide(2); // Earth
        let pose = rig.tick(1e-4);
        assert!((pose.position - pose_of(2).position).length() < 0.01);
    }

    #[test]
    fn galaxy_to_universe_glides_instead_of_snapping() {
        let mut rig = CameraRig::new(9); // Galaxy
        rig.set_slide(10); // Universe, the exempt pair
        let pose = rig.tick(1e-4);
        // Far from the destination on the first frame: still traveling.
        assert!((pose.position - pose_of(10).position).length() > 10.0);
    }

    #[test]
    fn within_segment_move_springs_toward_destination() {
        let mut rig = CameraRig::new(2);
        rig.set_slide(3);
        let start_distance = (pose_of(2).position - pose_of(3).position).length();

        let early = rig.tick(1.0 / 60.0);
        assert!((early.position - pose_of(3).position).length() > start_distance * 0.5);

        for _ in 0..(60 * 8) {
            rig.tick(1.0 / 60.0);
        }
        let settled = rig.tick(1.0 / 60.0);
        assert!((settled.position - pose_of(3).position).length() < 0.1);
        assert!((settled.fov - pose_of(3).fov).abs() < 0.1);
    }
}
