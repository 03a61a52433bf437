//! Slide navigation: the transition state machine at the center of the deck.
//!
//! Design goals:
//! - Deterministic and tick-driven. All "timers" are deadlines advanced by
//!   `Navigator::tick(dt)` from the per-frame render callback, so there is
//!   nothing to cancel on teardown and tests can drive time by hand.
//! - Single-flight: at most one transition in flight; navigation requested
//!   while busy is dropped, not queued. The busy check is the sole
//!   concurrency-control mechanism in the whole core.
//! - No failure modes: out-of-range targets are clamped, not rejected; every
//!   transition is a local state change with no I/O.
//!
//! Transition phases:
//! ```text
//! idle --request--> exiting --(exit delay)--> moving --(settle delay)--> idle
//! ```
//! - `exiting`: the old overlay fades out; `current_slide` still reads the
//!   old index.
//! - `moving`: `current_slide` has flipped to the target; the camera travels.
//!   The settle delay is short for the designated sibling pair (two states of
//!   one logical slide, where the camera barely moves) and long otherwise.

pub mod input;

use log::debug;

use crate::deck::{SIBLING_PAIR, TOTAL_SLIDES};

/// Phase of the slide transition cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Exiting,
    Moving,
}

/// Endpoints of the transition in flight. Present only while the state is
/// not `Idle`; cleared on return to `Idle`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransitionData {
    pub from: usize,
    pub to: usize,
}

/// The moment `current_slide` flips from the old index to the target, at the
/// `Exiting → Moving` edge. Callers re-derive camera pose and mount set from
/// this exactly once per transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SlideFlip {
    pub from: usize,
    pub to: usize,
}

/// Navigation timing and deck-shape configuration.
#[derive(Debug, Clone)]
pub struct NavConfig {
    pub total_slides: usize,
    /// Two indices treated as alternate states of one logical slide;
    /// transitions between them (either direction) use the sibling settle.
    pub sibling_pair: Option<(usize, usize)>,
    /// Content fade-out duration before the camera moves, in seconds.
    pub exit_secs: f32,
    /// Camera travel time for an ordinary transition, in seconds.
    pub settle_secs: f32,
    /// Camera settle for a sibling swap, in seconds.
    pub sibling_settle_secs: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            total_slides: TOTAL_SLIDES,
            sibling_pair: Some(SIBLING_PAIR),
            exit_secs: 0.6,
            settle_secs: 1.4,
            sibling_settle_secs: 0.05,
        }
    }
}

/// The slide-transition coordinator.
///
/// Owns `current_slide`, the transition phase, and the in-flight transition
/// data. All mutation happens on the caller's thread through discrete input
/// (`request_go_to` and friends) or the per-frame `tick`.
#[derive(Debug)]
pub struct Navigator {
    config: NavConfig,
    current: usize,
    state: TransitionState,
    data: Option<TransitionData>,
    phase_elapsed: f32,
}

impl Navigator {
    pub fn new(config: NavConfig) -> Self {
        debug_assert!(config.total_slides > 0, "a deck needs at least one slide");
        Self {
            config,
            current: 0,
            state: TransitionState::Idle,
            data: None,
            phase_elapsed: 0.0,
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// The slide the user currently sees (the target slide once `Moving`).
    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn transition_state(&self) -> TransitionState {
        self.state
    }

    pub fn transition_data(&self) -> Option<TransitionData> {
        self.data
    }

    pub fn is_idle(&self) -> bool {
        self.state == TransitionState::Idle
    }

    /// `(current, total)` for progress readouts.
    pub fn progress(&self) -> (usize, usize) {
        (self.current, self.config.total_slides)
    }

    /// Request a transition to `target`.
    ///
    /// The target is clamped into `[0, total_slides - 1]`; a clamped request
    /// is not an error. Returns `true` if the transition was started, `false`
    /// when the request was a no-op (already there, or a transition is in
    /// flight). Callers are free to ignore the return value — rejection is
    /// intentional backpressure, not a failure.
    ///
    /// This is also the programmatic entry point for external automation; it
    /// behaves identically to human-triggered input.
    pub fn request_go_to(&mut self, target: isize) -> bool {
        if self.state != TransitionState::Idle {
            debug!(
                "nav: dropped go_to({target}) while {:?} ({:?})",
                self.state, self.data
            );
            return false;
        }

        let clamped = target.clamp(0, self.config.total_slides as isize - 1) as usize;
        if clamped == self.current {
            return false;
        }

        debug!("nav: {} -> {clamped} (exiting)", self.current);
        self.data = Some(TransitionData {
            from: self.current,
            to: clamped,
        });
        self.state = TransitionState::Exiting;
        self.phase_elapsed = 0.0;
        true
    }

    /// Go to the next slide. No-op at the last slide or mid-transition.
    pub fn advance(&mut self) -> bool {
        self.request_go_to(self.current as isize + 1)
    }

    /// Go to the previous slide. No-op at the first slide or mid-transition.
    pub fn retreat(&mut self) -> bool {
        self.request_go_to(self.current as isize - 1)
    }

    /// Advance phase timers by `dt` seconds.
    ///
    /// Returns the slide flip when the `Exiting → Moving` edge fires this
    /// tick, so the caller can re-derive camera/mount state once.
    pub fn tick(&mut self, dt: f32) -> Option<SlideFlip> {
        match self.state {
            TransitionState::Idle => None,
            TransitionState::Exiting => {
                self.phase_elapsed += dt;
                if self.phase_elapsed < self.config.exit_secs {
                    return None;
                }

                // The data is set together with the state; its absence here
                // would mean the machine was mutated outside its own API.
                debug_assert!(self.data.is_some(), "exiting without transition data");
                let flip = self.data.map(|d| SlideFlip {
                    from: d.from,
                    to: d.to,
                })?;

                self.current = flip.to;
                self.state = TransitionState::Moving;
                self.phase_elapsed = 0.0;
                debug!("nav: slide {} -> {} (moving)", flip.from, flip.to);
                Some(flip)
            }
            TransitionState::Moving => {
                self.phase_elapsed += dt;
                if self.phase_elapsed >= self.settle_secs() {
                    self.state = TransitionState::Idle;
                    self.data = None;
                    self.phase_elapsed = 0.0;
                    debug!("nav: idle at slide {}", self.current);
                }
                None
            }
        }
    }

    /// Settle duration for the transition in flight.
    fn settle_secs(&self) -> f32 {
        if self.data.is_some_and(|d| self.is_sibling(d.from, d.to)) {
            self.config.sibling_settle_secs
        } else {
            self.config.settle_secs
        }
    }

    fn is_sibling(&self, from: usize, to: usize) -> bool {
        self.config
            .sibling_pair
            .is_some_and(|(a, b)| (from, to) == (a, b) || (from, to) == (b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> Navigator {
        Navigator::new(NavConfig::default())
    }

    /// Tick until idle, counting the time spent in each phase.
    fn run_to_idle(nav: &mut Navigator) -> (f32, f32) {
        const STEP: f32 = 0.01;
        let (mut exiting, mut moving) = (0.0, 0.0);
        let mut guard = 0;
        while !nav.is_idle() {
            match nav.transition_state() {
                TransitionState::Exiting => exiting += STEP,
                TransitionState::Moving => moving += STEP,
                TransitionState::Idle => {}
            }
            nav.tick(STEP);
            guard += 1;
            assert!(guard < 100_000, "transition never settled");
        }
        (exiting, moving)
    }

    #[test]
    fn targets_are_clamped_into_range() {
        for target in [-5isize, -1, 0, 3, 10, 11, 999] {
            let mut n = nav();
            n.request_go_to(target);
            run_to_idle(&mut n);
            let expected = target.clamp(0, TOTAL_SLIDES as isize - 1) as usize;
            assert_eq!(n.current_slide(), expected, "target {target}");
        }
    }

    #[test]
    fn go_to_current_slide_is_a_noop() {
        let mut n = nav();
        assert!(!n.request_go_to(0));
        assert!(n.is_idle());
        // Clamp-to-current is also a no-op.
        assert!(!n.request_go_to(-3));
    }

    #[test]
    fn second_request_during_transition_is_dropped() {
        let mut n = nav();
        assert!(n.request_go_to(4));
        n.tick(0.1); // still exiting
        assert!(!n.request_go_to(8));
        n.tick(0.6); // flips into moving
        assert!(!n.request_go_to(8));
        run_to_idle(&mut n);
        assert_eq!(n.current_slide(), 4);
    }

    #[test]
    fn rapid_double_advance_moves_one_slide() {
        let mut n = nav();
        assert!(n.advance());
        assert!(!n.advance()); // zero delay between presses
        run_to_idle(&mut n);
        assert_eq!(n.current_slide(), 1);
    }

    #[test]
    fn slide_flips_at_the_exit_edge() {
        let mut n = nav();
        n.request_go_to(2);
        assert_eq!(n.current_slide(), 0);
        assert!(n.tick(0.3).is_none());
        assert_eq!(n.current_slide(), 0);
        let flip = n.tick(0.3).expect("exit delay elapsed");
        assert_eq!((flip.from, flip.to), (0, 2));
        assert_eq!(n.current_slide(), 2);
        assert_eq!(n.transition_state(), TransitionState::Moving);
    }

    #[test]
    fn transition_data_present_only_while_busy() {
        let mut n = nav();
        assert!(n.transition_data().is_none());
        n.request_go_to(1);
        assert_eq!(
            n.transition_data(),
            Some(TransitionData { from: 0, to: 1 })
        );
        run_to_idle(&mut n);
        assert!(n.transition_data().is_none());
    }

    #[test]
    fn five_advances_walk_through_the_sibling_swap() {
        // Spec scenario: from slide 5, five advances end at slide 10; the
        // 6 -> 7 step's moving phase is measurably shorter than the others.
        let mut n = nav();
        n.request_go_to(5);
        run_to_idle(&mut n);

        let mut moving_times = Vec::new();
        for _ in 0..5 {
            assert!(n.advance());
            let (exiting, moving) = run_to_idle(&mut n);
            assert!(exiting >= n.config().exit_secs);
            moving_times.push(moving);
        }
        assert_eq!(n.current_slide(), 10);

        // Step index 1 is 6 -> 7, the sibling swap.
        let sibling = moving_times[1];
        for (i, &m) in moving_times.iter().enumerate() {
            if i == 1 {
                assert!(m < 0.2, "sibling settle took {m}s");
            } else {
                assert!(m > sibling * 4.0, "step {i} settled in {m}s");
            }
        }
    }

    #[test]
    fn sibling_swap_is_fast_in_both_directions() {
        let mut n = nav();
        n.request_go_to(7);
        run_to_idle(&mut n);
        n.retreat();
        let (_, moving) = run_to_idle(&mut n);
        assert_eq!(n.current_slide(), 6);
        assert!(moving < 0.2);
    }

    #[test]
    fn advance_at_last_slide_is_rejected() {
        let mut n = nav();
        n.request_go_to(TOTAL_SLIDES as isize - 1);
        run_to_idle(&mut n);
        assert!(!n.advance());
        assert!(n.is_idle());
        assert_eq!(n.current_slide(), TOTAL_SLIDES - 1);
    }

    #[test]
    fn progress_reports_current_and_total() {
        let mut n = nav();
        assert_eq!(n.progress(), (0, TOTAL_SLIDES));
        n.request_go_to(3);
        run_to_idle(&mut n);
        assert_eq!(n.progress(), (3, TOTAL_SLIDES));
    }
}
