//! Slide content records and the content store.
//!
//! The core treats content as opaque: the only operation it performs on any
//! field is equality comparison (overlay continuity, see `crate::overlay`).
//! Layout/position enums exist so a renderer can pick a template; the core
//! compares them like any other field.

/// Which content template a slide uses. Uninterpreted by the core.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Plain,
    Columns,
    Blocks,
    List,
    Funnel,
    Stats,
    Contact,
    Video,
    Ask,
}

/// Where the main content block anchors on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Center,
    CenterLeft,
    CenterRight,
    BottomLeft,
    BottomRight,
}

/// One slide's overlay content.
///
/// All text fields are optional; a slide may be pure backdrop. The
/// `subtitle_boxed` flag participates in the subtitle's continuity
/// comparison because a boxed and an unboxed subtitle render differently
/// even when the text matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideContent {
    pub header: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub subtitle_boxed: bool,
    pub body: Option<String>,
    pub footer: Option<String>,
    pub layout: Layout,
    pub position: Position,
}

impl SlideContent {
    pub fn new(layout: Layout, position: Position) -> Self {
        Self {
            layout,
            position,
            ..Default::default()
        }
    }

    pub fn header(mut self, text: &str) -> Self {
        self.header = Some(text.to_owned());
        self
    }

    pub fn title(mut self, text: &str) -> Self {
        self.title = Some(text.to_owned());
        self
    }

    pub fn subtitle(mut self, text: &str) -> Self {
        self.subtitle = Some(text.to_owned());
        self
    }

    pub fn boxed_subtitle(mut self, text: &str) -> Self {
        self.subtitle = Some(text.to_owned());
        self.subtitle_boxed = true;
        self
    }

    pub fn body(mut self, text: &str) -> Self {
        self.body = Some(text.to_owned());
        self
    }

    pub fn footer(mut self, text: &str) -> Self {
        self.footer = Some(text.to_owned());
        self
    }
}

/// Slice-backed content lookup keyed by slide index.
#[derive(Debug, Clone)]
pub struct ContentStore {
    slides: Vec<SlideContent>,
}

impl ContentStore {
    /// Wrap a per-slide content table.
    ///
    /// The table must have one entry per slide; the deck renderer constructs
    /// it alongside the navigator with the same slide count.
    pub fn new(slides: Vec<SlideContent>) -> Self {
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Content for one slide. Out-of-range lookup is a table/navigator
    /// mismatch and is loud in development.
    pub fn content_of(&self, slide: usize) -> &SlideContent {
        debug_assert!(
            slide < self.slides.len(),
            "content_of: slide {slide} has no content entry (table holds {})",
            self.slides.len()
        );
        &self.slides[slide]
    }
}

/// The built-in demo deck: an 11-slide cosmic-zoom tour.
///
/// Slides 6 and 7 are the sibling pair — two states of one "Sun" slide that
/// share header, boxed subtitle, and footer, so the overlay continuity rule
/// and the fast sibling swap are exercised end-to-end.
pub fn demo_deck() -> ContentStore {
    let shared_sun_subtitle =
        "One star, two readings: the view from the ecliptic and the view from above.";
    let shared_sun_footer = "Orbit holds while you compare.";

    ContentStore::new(vec![
        // 0: cover, street level
        SlideContent::new(Layout::Plain, Position::Center)
            .title("Cosmodeck")
            .subtitle("A guided zoom from one street corner to the edge of the map.")
            .footer("Scroll, swipe, or use the arrow keys."),
        // 1: aerial city
        SlideContent::new(Layout::Columns, Position::Center)
            .header("The City")
            .footer("Same streets, five hundred meters up."),
        // 2: coastline
        SlideContent::new(Layout::Columns, Position::Center)
            .header("The Coast")
            .boxed_subtitle("From here the grid dissolves into geography.")
            .footer("Altitude: low orbit."),
        // 3: continent
        SlideContent::new(Layout::Blocks, Position::Center)
            .header("The Continent")
            .subtitle("Borders are the last human artifact visible at this height."),
        // 4: full planet
        SlideContent::new(Layout::List, Position::Center).header("The Planet"),
        // 5: full planet, annotated
        SlideContent::new(Layout::Video, Position::Center).header("The Planet"),
        // 6: sun, state one (funnel)
        SlideContent::new(Layout::Funnel, Position::Center)
            .header("The Sun")
            .boxed_subtitle(shared_sun_subtitle)
            .footer(shared_sun_footer),
        // 7: sun, state two (columns) — sibling of 6
        SlideContent::new(Layout::Columns, Position::Center)
            .header("The Sun")
            .boxed_subtitle(shared_sun_subtitle)
            .footer(shared_sun_footer),
        // 8: galaxy
        SlideContent::new(Layout::Stats, Position::Center).header("The Galaxy"),
        // 9: clusters
        SlideContent::new(Layout::List, Position::CenterLeft).header("The Cluster"),
        // 10: universe
        SlideContent::new(Layout::Contact, Position::Center)
            .header("The Universe")
            .footer("Thanks for riding along."),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{SIBLING_PAIR, TOTAL_SLIDES};

    #[test]
    fn demo_deck_covers_every_slide() {
        let store = demo_deck();
        assert_eq!(store.len(), TOTAL_SLIDES);
        for slide in 0..TOTAL_SLIDES {
            // Must not panic / trip the debug assertion.
            let _ = store.content_of(slide);
        }
    }

    #[test]
    fn sibling_slides_share_persistent_fields() {
        let store = demo_deck();
        let (a, b) = SIBLING_PAIR;
        let first = store.content_of(a);
        let second = store.content_of(b);
        assert_eq!(first.header, second.header);
        assert_eq!(first.subtitle, second.subtitle);
        assert_eq!(first.subtitle_boxed, second.subtitle_boxed);
        assert_eq!(first.footer, second.footer);
        // The states must still differ somewhere, or they wouldn't be two slides.
        assert_ne!(first.layout, second.layout);
    }
}
