//! Input normalization: keys, wheel deltas, and touch sequences become
//! discrete advance/retreat intents.
//!
//! The hard part is not the mapping but the arbitration: a wheel tick or a
//! vertical swipe can mean "change slide" or "scroll the overlay content".
//! The rule is that native scroll wins — only when the nearest scrollable
//! region is absent, or already at its boundary in the gesture's direction,
//! does the gesture count toward navigation.
//!
//! The normalizer never touches the navigator itself; it returns
//! `NavIntent`s and the caller feeds them into the same `advance`/`retreat`
//! entry points every channel shares. Those are no-ops outside `Idle`, so
//! simultaneous multi-channel input cannot double-advance.
//!
//! DOM-free design note: the normalizer does not walk any element tree. The
//! overlay layer resolves the nearest scrollable ancestor (see
//! `crate::overlay::ScrollProbe`) and hands in a boundary snapshot per
//! event; the normalizer only reasons about `at_top`/`at_bottom`.

use log::trace;
use winit::keyboard::KeyCode;

/// Unconsumed wheel delta needed to trigger one navigation step.
pub const OVERSCROLL_THRESHOLD: f32 = 50.0;

/// Gap after which the overscroll accumulator resets (wheel momentum died).
pub const WHEEL_DEBOUNCE_MS: u64 = 200;

/// Net vertical travel that always counts as a swipe.
pub const SWIPE_DISTANCE: f32 = 50.0;

/// Smaller travel that still counts when completed inside the flick window.
pub const FLICK_DISTANCE: f32 = 20.0;

/// Maximum duration of a fast flick.
pub const FLICK_WINDOW_MS: u64 = 300;

/// A normalized navigation request. Every input channel resolves to one of
/// these; `goTo`-style jumps go straight to `Navigator::request_go_to`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NavIntent {
    Advance,
    Retreat,
}

/// Boundary snapshot of the scrollable region under the gesture, taken by
/// the overlay layer at event time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScrollRegion {
    pub at_top: bool,
    pub at_bottom: bool,
}

impl ScrollRegion {
    /// Whether native scrolling can still absorb movement in the gesture's
    /// direction (positive delta = downward).
    #[inline]
    fn absorbs(&self, delta_down: f32) -> bool {
        (delta_down > 0.0 && !self.at_bottom) || (delta_down < 0.0 && !self.at_top)
    }
}

/// In-flight touch gesture, recorded at touch-start.
#[derive(Debug, Copy, Clone)]
struct TouchGesture {
    start_y: f32,
    start_ms: u64,
    region: Option<ScrollRegion>,
    /// Set on the first move that is not absorbed by native scroll. Only a
    /// flagged gesture may navigate on touch-end.
    swipe: bool,
}

/// Turns raw device events into `NavIntent`s.
///
/// Stateful only where the input itself is stateful: the overscroll
/// accumulator and the current touch gesture.
#[derive(Debug, Default)]
pub struct InputNormalizer {
    overscroll: f32,
    last_wheel_ms: Option<u64>,
    gesture: Option<TouchGesture>,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current accumulator value (exposed for tests and debug HUDs).
    pub fn overscroll(&self) -> f32 {
        self.overscroll
    }

    /// Reset the overscroll accumulator. The deck calls this on every slide
    /// change so momentum from one slide never bleeds into the next.
    pub fn reset_overscroll(&mut self) {
        self.overscroll = 0.0;
    }

    /// Keyboard mapping. Forward keys advance, backward keys retreat; the
    /// caller marks matched events consumed to suppress native scrolling.
    pub fn intent_for_key(key: KeyCode) -> Option<NavIntent> {
        match key {
            KeyCode::ArrowRight | KeyCode::ArrowDown | KeyCode::Space => Some(NavIntent::Advance),
            KeyCode::ArrowLeft | KeyCode::ArrowUp => Some(NavIntent::Retreat),
            _ => None,
        }
    }

    /// Feed one wheel event.
    ///
    /// `delta_down` is positive when the content would scroll down (the
    /// "advance" direction). `region` is the boundary snapshot of the
    /// nearest scrollable region under the cursor, if any.
    pub fn on_wheel(
        &mut self,
        delta_down: f32,
        now_ms: u64,
        region: Option<ScrollRegion>,
    ) -> Option<NavIntent> {
        // Momentum died out: start a fresh accumulation run.
        if let Some(last) = self.last_wheel_ms
            && now_ms.saturating_sub(last) > WHEEL_DEBOUNCE_MS
        {
            self.overscroll = 0.0;
        }
        self.last_wheel_ms = Some(now_ms);

        // Native scroll wins while the region still has room in this direction.
        if let Some(region) = region
            && region.absorbs(delta_down)
        {
            self.overscroll = 0.0;
            return None;
        }

        self.overscroll += delta_down;
        trace!("input: overscroll {:.1}", self.overscroll);

        if self.overscroll.abs() > OVERSCROLL_THRESHOLD {
            let intent = if self.overscroll > 0.0 {
                NavIntent::Advance
            } else {
                NavIntent::Retreat
            };
            self.overscroll = 0.0;
            Some(intent)
        } else {
            None
        }
    }

    /// Begin a touch gesture at vertical position `y`.
    pub fn on_touch_start(&mut self, y: f32, now_ms: u64, region: Option<ScrollRegion>) {
        self.gesture = Some(TouchGesture {
            start_y: y,
            start_ms: now_ms,
            region,
            swipe: false,
        });
    }

    /// Feed a touch move. Returns `true` when the deck should consume the
    /// event (the gesture is a slide swipe); `false` lets the overlay scroll
    /// natively.
    pub fn on_touch_move(&mut self, y: f32) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };

        // Finger moving up drags the content down: positive = advance.
        let delta_down = gesture.start_y - y;

        if let Some(region) = gesture.region
            && region.absorbs(delta_down)
        {
            return false;
        }

        gesture.swipe = true;
        true
    }

    /// Finish the gesture. Emits an intent only for a flagged swipe that
    /// cleared the distance threshold, or the smaller flick threshold inside
    /// the flick window.
    pub fn on_touch_end(&mut self, y: f32, now_ms: u64) -> Option<NavIntent> {
        let gesture = self.gesture.take()?;
        if !gesture.swipe {
            return None;
        }

        let delta_down = gesture.start_y - y;
        let elapsed_ms = now_ms.saturating_sub(gesture.start_ms);
        let is_swipe = delta_down.abs() > SWIPE_DISTANCE;
        let is_flick = delta_down.abs() > FLICK_DISTANCE && elapsed_ms <= FLICK_WINDOW_MS;

        if !(is_swipe || is_flick) {
            return None;
        }
        if delta_down > 0.0 {
            Some(NavIntent::Advance)
        } else {
            Some(NavIntent::Retreat)
        }
    }

    /// Abandon the gesture (touch-cancel, focus loss).
    pub fn on_touch_cancel(&mut self) {
        self.gesture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_sequence_crossing_threshold_fires_once() {
        // Spec scenario: deltas [10, 15, 30] inside the debounce window sum
        // to 55 > 50 and trigger exactly one advance, leaving the
        // accumulator at zero.
        let mut input = InputNormalizer::new();
        assert_eq!(input.on_wheel(10.0, 0, None), None);
        assert_eq!(input.on_wheel(15.0, 50, None), None);
        assert_eq!(input.on_wheel(30.0, 100, None), Some(NavIntent::Advance));
        assert_eq!(input.overscroll(), 0.0);
    }

    #[test]
    fn upward_overscroll_retreats() {
        let mut input = InputNormalizer::new();
        assert_eq!(input.on_wheel(-30.0, 0, None), None);
        assert_eq!(input.on_wheel(-30.0, 10, None), Some(NavIntent::Retreat));
    }

    #[test]
    fn debounce_gap_resets_accumulation() {
        let mut input = InputNormalizer::new();
        input.on_wheel(40.0, 0, None);
        // 250 ms of silence: the 40 units must not carry over.
        assert_eq!(input.on_wheel(20.0, 250, None), None);
        assert_eq!(input.overscroll(), 20.0);
    }

    #[test]
    fn scrollable_region_with_room_absorbs_the_wheel() {
        let mut input = InputNormalizer::new();
        let mid_scroll = Some(ScrollRegion {
            at_top: false,
            at_bottom: false,
        });
        input.on_wheel(40.0, 0, None);
        // Entering a scrollable region resets accumulated overscroll.
        assert_eq!(input.on_wheel(40.0, 10, mid_scroll), None);
        assert_eq!(input.overscroll(), 0.0);
        // And keeps absorbing while there is room.
        assert_eq!(input.on_wheel(100.0, 20, mid_scroll), None);
    }

    #[test]
    fn wheel_at_region_boundary_accumulates() {
        let mut input = InputNormalizer::new();
        let at_bottom = Some(ScrollRegion {
            at_top: false,
            at_bottom: true,
        });
        assert_eq!(input.on_wheel(30.0, 0, at_bottom), None);
        assert_eq!(input.on_wheel(30.0, 10, at_bottom), Some(NavIntent::Advance));

        // Scrolling up from the bottom still has room: native wins.
        let mut input = InputNormalizer::new();
        assert_eq!(input.on_wheel(-60.0, 0, at_bottom), None);
        assert_eq!(input.overscroll(), 0.0);
    }

    #[test]
    fn slide_change_reset_clears_momentum() {
        let mut input = InputNormalizer::new();
        input.on_wheel(45.0, 0, None);
        input.reset_overscroll();
        assert_eq!(input.on_wheel(10.0, 10, None), None);
    }

    #[test]
    fn key_mapping() {
        assert_eq!(
            InputNormalizer::intent_for_key(KeyCode::ArrowRight),
            Some(NavIntent::Advance)
        );
        assert_eq!(
            InputNormalizer::intent_for_key(KeyCode::ArrowDown),
            Some(NavIntent::Advance)
        );
        assert_eq!(
            InputNormalizer::intent_for_key(KeyCode::Space),
            Some(NavIntent::Advance)
        );
        assert_eq!(
            InputNormalizer::intent_for_key(KeyCode::ArrowLeft),
            Some(NavIntent::Retreat)
        );
        assert_eq!(
            InputNormalizer::intent_for_key(KeyCode::ArrowUp),
            Some(NavIntent::Retreat)
        );
        assert_eq!(InputNormalizer::intent_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn long_swipe_up_advances() {
        let mut input = InputNormalizer::new();
        input.on_touch_start(500.0, 0, None);
        assert!(input.on_touch_move(440.0));
        assert_eq!(
            input.on_touch_end(420.0, 600), // 80 px over 600 ms
            Some(NavIntent::Advance)
        );
    }

    #[test]
    fn short_slow_drag_does_not_navigate() {
        let mut input = InputNormalizer::new();
        input.on_touch_start(500.0, 0, None);
        input.on_touch_move(480.0);
        assert_eq!(input.on_touch_end(470.0, 900), None); // 30 px, too slow
    }

    #[test]
    fn fast_flick_clears_the_smaller_threshold() {
        let mut input = InputNormalizer::new();
        input.on_touch_start(500.0, 0, None);
        input.on_touch_move(490.0);
        assert_eq!(
            input.on_touch_end(470.0, 200), // 30 px in 200 ms
            Some(NavIntent::Advance)
        );
    }

    #[test]
    fn downward_swipe_retreats() {
        let mut input = InputNormalizer::new();
        input.on_touch_start(300.0, 0, None);
        input.on_touch_move(380.0);
        assert_eq!(input.on_touch_end(380.0, 400), Some(NavIntent::Retreat));
    }

    #[test]
    fn touch_inside_scrollable_region_stays_native() {
        let mut input = InputNormalizer::new();
        let mid_scroll = Some(ScrollRegion {
            at_top: false,
            at_bottom: false,
        });
        input.on_touch_start(500.0, 0, mid_scroll);
        // Not absorbed only at boundaries; mid-scroll never flags the swipe.
        assert!(!input.on_touch_move(400.0));
        assert_eq!(input.on_touch_end(380.0, 150), None);
    }

    #[test]
    fn touch_at_boundary_becomes_a_swipe() {
        let mut input = InputNormalizer::new();
        let at_bottom = Some(ScrollRegion {
            at_top: false,
            at_bottom: true,
        });
        input.on_touch_start(500.0, 0, at_bottom);
        assert!(input.on_touch_move(430.0)); // downward gesture, no room left
        assert_eq!(input.on_touch_end(430.0, 250), Some(NavIntent::Advance));
    }

    #[test]
    fn cancelled_gesture_emits_nothing() {
        let mut input = InputNormalizer::new();
        input.on_touch_start(500.0, 0, None);
        input.on_touch_move(400.0);
        input.on_touch_cancel();
        assert_eq!(input.on_touch_end(300.0, 100), None);
    }

    #[test]
    fn unflagged_gesture_never_navigates() {
        // End without any move: the gesture was never flagged as a swipe.
        let mut input = InputNormalizer::new();
        input.on_touch_start(500.0, 0, None);
        assert_eq!(input.on_touch_end(300.0, 100), None);
    }
}
