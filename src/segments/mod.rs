//! Scene segments: the coarse 3D backdrops a slide can sit in, plus the
//! mount planner that decides which of them are instantiated.
//!
//! Design goals:
//! - The mount set is *derived* state: recomputed fresh from the current
//!   slide every time, never accumulated or diffed. This sidesteps stale-set
//!   bugs by construction.
//! - Each segment renders through one small uniform contract
//!   (`SegmentUnit`): composition over a segment enum instead of an
//!   inheritance tree of scene classes.
//!
//! Mount policy:
//! - Always the current slide's segment.
//! - Additionally the neighboring slide's segment when the current slide is
//!   the first or last slide of its segment's range, so heavy scenes preload
//!   before the camera crosses the boundary instead of popping in.

pub mod units;

use glam::Vec3;

use crate::deck::TOTAL_SLIDES;
use crate::render::primitives::Rgba;

/// A coarse 3D scene spanning one or more consecutive slides.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    City,
    Earth,
    Solar,
    Galaxy,
    Universe,
}

impl Segment {
    pub const COUNT: usize = 5;

    pub const ALL: [Segment; Segment::COUNT] = [
        Segment::City,
        Segment::Earth,
        Segment::Solar,
        Segment::Galaxy,
        Segment::Universe,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Segment::City => 0,
            Segment::Earth => 1,
            Segment::Solar => 2,
            Segment::Galaxy => 3,
            Segment::Universe => 4,
        }
    }
}

/// Fixed slide → segment assignment for the built-in deck.
pub const SLIDE_SEGMENTS: [Segment; TOTAL_SLIDES] = [
    Segment::City,     // 0: cover, street level
    Segment::City,     // 1: aerial
    Segment::Earth,    // 2: coastline
    Segment::Earth,    // 3: continent
    Segment::Earth,    // 4: full planet
    Segment::Earth,    // 5: full planet, annotated
    Segment::Solar,    // 6: sun, state one
    Segment::Solar,    // 7: sun, state two
    Segment::Galaxy,   // 8: galaxy
    Segment::Galaxy,   // 9: clusters
    Segment::Universe, // 10: universe
];

/// Segment for one slide. Out-of-range is a table/navigator mismatch and is
/// loud in development.
#[inline]
pub fn segment_of(slide: usize) -> Segment {
    debug_assert!(
        slide < SLIDE_SEGMENTS.len(),
        "segment_of: slide {slide} has no segment entry"
    );
    SLIDE_SEGMENTS[slide]
}

/// The set of segments that must be instantiated for a given slide.
///
/// Membership is a plain bitset over `Segment::ALL`; the set is rebuilt from
/// scratch on every slide change (see module docs).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct MountSet {
    mounted: [bool; Segment::COUNT],
}

impl MountSet {
    #[inline]
    pub fn contains(&self, segment: Segment) -> bool {
        self.mounted[segment.index()]
    }

    pub fn len(&self) -> usize {
        self.mounted.iter().filter(|&&m| m).count()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.iter().all(|&m| !m)
    }

    pub fn iter(&self) -> impl Iterator<Item = Segment> + '_ {
        Segment::ALL.into_iter().filter(|s| self.contains(*s))
    }

    fn insert(&mut self, segment: Segment) {
        self.mounted[segment.index()] = true;
    }
}

/// Pure mount planner: current segment plus adjacent segments at boundaries.
///
/// Guarantees:
/// - always contains `segment_of(slide)`
/// - contains at most 3 segments
pub fn mount_set(slide: usize) -> MountSet {
    let current = segment_of(slide);
    let mut set = MountSet::default();
    set.insert(current);

    if slide + 1 < TOTAL_SLIDES {
        let next = segment_of(slide + 1);
        if next != current {
            set.insert(next);
        }
    }
    if slide > 0 {
        let prev = segment_of(slide - 1);
        if prev != current {
            set.insert(prev);
        }
    }

    set
}

/// A world-space colored quad a segment wants drawn this frame.
///
/// Billboards are the segments' entire visual vocabulary here: the deck
/// renderer projects them through the camera and batches them as screen
/// quads. Scene fidelity is deliberately out of scope.
#[derive(Debug, Copy, Clone)]
pub struct Billboard {
    pub position: Vec3,
    /// World-space edge length before perspective scaling.
    pub size: f32,
    pub color: Rgba,
}

/// The mountable, visibility-gated scene unit contract.
///
/// The renderer guarantees `visible` is true only for the active slide's
/// segment; merely premounted neighbors receive `visible == false` and must
/// not advance their internal animation (that is the whole point of the
/// premount: be resident but cheap).
pub trait SegmentUnit {
    fn segment(&self) -> Segment;

    /// Advance internal animation by `dt` seconds. Implementations gate on
    /// `visible` themselves.
    fn update(&mut self, current_slide: usize, visible: bool, dt: f32);

    /// Clear color behind this segment's billboards.
    fn backdrop(&self) -> Rgba;

    /// Emit this frame's billboards. Only called while visible.
    fn emit(&self, current_slide: usize, out: &mut Vec<Billboard>);
}

/// Construct the concrete unit for a segment.
pub fn build_unit(segment: Segment) -> Box<dyn SegmentUnit> {
    match segment {
        Segment::City => Box::new(units::CityUnit::new()),
        Segment::Earth => Box::new(units::EarthUnit::new()),
        Segment::Solar => Box::new(units::SolarUnit::new()),
        Segment::Galaxy => Box::new(units::GalaxyUnit::new()),
        Segment::Universe => Box::new(units::UniverseUnit::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_set_contains_active_segment() {
        for slide in 0..TOTAL_SLIDES {
            let set = mount_set(slide);
            assert!(set.contains(segment_of(slide)), "slide {slide}");
            assert!(set.len() <= 3, "slide {slide}");
            assert!(!set.is_empty());
        }
    }

    #[test]
    fn interior_slide_mounts_only_its_segment() {
        // Slide 3 sits strictly inside the Earth range (2..=5).
        let set = mount_set(3);
        assert_eq!(set.len(), 1);
        assert!(set.contains(Segment::Earth));
    }

    #[test]
    fn boundary_slides_premount_neighbors() {
        // Slide 1 is the last City slide; Earth starts at 2.
        let set = mount_set(1);
        assert!(set.contains(Segment::City));
        assert!(set.contains(Segment::Earth));
        assert_eq!(set.len(), 2);

        // Slide 2 is the first Earth slide; City ends at 1.
        let set = mount_set(2);
        assert!(set.contains(Segment::Earth));
        assert!(set.contains(Segment::City));
        assert_eq!(set.len(), 2);

        // Edge slides have only one neighbor to consider.
        assert_eq!(mount_set(0).len(), 1);
        let last = mount_set(TOTAL_SLIDES - 1);
        assert!(last.contains(Segment::Universe));
        assert!(last.contains(Segment::Galaxy));
    }

    #[test]
    fn mount_set_is_pure() {
        // Same input, same output, no accumulated state.
        assert_eq!(mount_set(5), mount_set(5));
        let _ = mount_set(9);
        assert_eq!(mount_set(5), mount_set(5));
    }

    #[test]
    fn hidden_units_do_not_animate() {
        for segment in Segment::ALL {
            let mut unit = build_unit(segment);
            let slide = SLIDE_SEGMENTS
                .iter()
                .position(|&s| s == segment)
                .expect("every segment appears in the slide table");

            let mut before = Vec::new();
            unit.emit(slide, &mut before);
            unit.update(slide, false, 10.0);
            let mut after = Vec::new();
            unit.emit(slide, &mut after);

            assert_eq!(before.len(), after.len(), "{segment:?}");
            for (a, b) in before.iter().zip(after.iter()) {
                assert_eq!(a.position, b.position, "{segment:?} animated while hidden");
            }
        }
    }
}
