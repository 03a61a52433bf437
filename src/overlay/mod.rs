//! Overlay visibility: which text fields survive a transition.
//!
//! Default rule: a field is visible only while the navigator is idle (old
//! content fades during `Exiting`, new content appears on return to `Idle`).
//!
//! Continuity exception: when a field's content is byte-identical between
//! the `from` and `to` slides of the transition in flight, the field stays
//! visible the whole way through. This is what makes multi-state slides
//! work — on the sibling swap the header/subtitle/footer hold steady while
//! only the body content changes. The subtitle additionally compares its
//! boxed-presentation flag, because a boxed and an unboxed subtitle render
//! differently even with equal text.
//!
//! Each field kind is evaluated independently; one transition can have some
//! fields persist and others fade.

use crate::deck::{ContentStore, SlideContent};
use crate::nav::input::ScrollRegion;
use crate::nav::{TransitionData, TransitionState};

/// The independently-faded overlay text fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Header,
    Title,
    Subtitle,
    Footer,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Header,
        FieldKind::Title,
        FieldKind::Subtitle,
        FieldKind::Footer,
    ];
}

fn field_text(content: &SlideContent, kind: FieldKind) -> Option<&str> {
    match kind {
        FieldKind::Header => content.header.as_deref(),
        FieldKind::Title => content.title.as_deref(),
        FieldKind::Subtitle => content.subtitle.as_deref(),
        FieldKind::Footer => content.footer.as_deref(),
    }
}

/// Whether `kind` should be rendered for `slide` right now.
pub fn field_visible(
    store: &ContentStore,
    slide: usize,
    state: TransitionState,
    data: Option<&TransitionData>,
    kind: FieldKind,
) -> bool {
    if state == TransitionState::Idle {
        return true;
    }

    // Mid-transition: visible only under the continuity exception.
    let Some(data) = data else {
        return false;
    };
    let current = store.content_of(slide);
    let Some(text) = field_text(current, kind) else {
        return false;
    };

    let from = store.content_of(data.from);
    let to = store.content_of(data.to);
    let matches = field_text(from, kind) == Some(text) && field_text(to, kind) == Some(text);

    if kind == FieldKind::Subtitle {
        matches && from.subtitle_boxed == to.subtitle_boxed
    } else {
        matches
    }
}

/// Resolves the scrollable region under a point for the input normalizer.
///
/// In the DOM original this is "walk ancestors until an element with
/// overflow and unfilled scroll room is found"; here the overlay layer owns
/// that knowledge and the rest of the core only sees boundary flags.
pub trait ScrollProbe {
    fn region_at(&self, x: f64, y: f64) -> Option<ScrollRegion>;
}

/// The built-in renderer draws no scrollable content.
#[derive(Debug, Default)]
pub struct NoOverlayScroll;

impl ScrollProbe for NoOverlayScroll {
    fn region_at(&self, _x: f64, _y: f64) -> Option<ScrollRegion> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::content::demo_deck;
    use crate::deck::{Layout, Position, SIBLING_PAIR, SlideContent};

    fn store(slides: Vec<SlideContent>) -> ContentStore {
        ContentStore::new(slides)
    }

    #[test]
    fn everything_visible_while_idle() {
        let deck = demo_deck();
        for kind in FieldKind::ALL {
            assert!(field_visible(&deck, 0, TransitionState::Idle, None, kind));
        }
    }

    #[test]
    fn fields_fade_during_ordinary_transitions() {
        let deck = demo_deck();
        let data = TransitionData { from: 0, to: 1 };
        for state in [TransitionState::Exiting, TransitionState::Moving] {
            for kind in FieldKind::ALL {
                assert!(
                    !field_visible(&deck, 0, state, Some(&data), kind),
                    "{kind:?} stayed visible in {state:?}"
                );
            }
        }
    }

    #[test]
    fn identical_footer_persists_through_the_transition() {
        // Spec property 5: identical footers never fade.
        let deck = store(vec![
            SlideContent::new(Layout::Plain, Position::Center)
                .title("a")
                .footer("shared footer"),
            SlideContent::new(Layout::List, Position::Center)
                .title("b")
                .footer("shared footer"),
        ]);
        let data = TransitionData { from: 0, to: 1 };
        for state in [TransitionState::Exiting, TransitionState::Moving] {
            assert!(field_visible(&deck, 0, state, Some(&data), FieldKind::Footer));
            assert!(field_visible(&deck, 1, state, Some(&data), FieldKind::Footer));
            // Titles differ, so they fade in the very same transition.
            assert!(!field_visible(&deck, 0, state, Some(&data), FieldKind::Title));
        }
    }

    #[test]
    fn sibling_swap_keeps_shared_fields() {
        let deck = demo_deck();
        let (a, b) = SIBLING_PAIR;
        let data = TransitionData { from: a, to: b };
        for kind in [FieldKind::Header, FieldKind::Subtitle, FieldKind::Footer] {
            assert!(
                field_visible(&deck, a, TransitionState::Moving, Some(&data), kind),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn boxed_flag_breaks_subtitle_continuity() {
        let deck = store(vec![
            SlideContent::new(Layout::Plain, Position::Center).boxed_subtitle("same words"),
            SlideContent::new(Layout::Plain, Position::Center).subtitle("same words"),
        ]);
        let data = TransitionData { from: 0, to: 1 };
        assert!(!field_visible(
            &deck,
            0,
            TransitionState::Exiting,
            Some(&data),
            FieldKind::Subtitle
        ));
    }

    #[test]
    fn absent_field_never_persists() {
        let deck = store(vec![
            SlideContent::new(Layout::Plain, Position::Center),
            SlideContent::new(Layout::Plain, Position::Center),
        ]);
        let data = TransitionData { from: 0, to: 1 };
        for kind in FieldKind::ALL {
            assert!(!field_visible(
                &deck,
                0,
                TransitionState::Moving,
                Some(&data),
                kind
            ));
        }
    }

    #[test]
    fn no_scroll_probe_reports_nothing() {
        assert_eq!(NoOverlayScroll.region_at(10.0, 10.0), None);
    }
}
