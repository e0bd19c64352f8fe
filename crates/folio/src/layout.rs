//! # Page Layout
//!
//! Geometry of everything the page animates, in document coordinates. The
//! host measures its DOM and sends a fresh layout whenever it reflows.
//!
//! ```toml
//! document_height = 4200.0
//! shapes = 4
//!
//! [[sections]]
//! name = "home"
//! top = 0.0
//! height = 900.0
//!
//! [[reveals]]
//! id = 10
//! bounds = { x = 100.0, y = 1000.0, width = 500.0, height = 300.0 }
//! delay = 0.2
//! ```

use folio_core::{FolioResult, Rect};
use folio_ui::{ElementId, Section};
use serde::Deserialize;

/// Element with a one-shot reveal animation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevealElement {
    /// Element handle.
    pub id: ElementId,
    /// Document bounds.
    pub bounds: Rect,
    /// Seconds between becoming visible and animating.
    #[serde(default)]
    pub delay: f32,
}

/// Skill progress bar that fills to `width` percent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillBar {
    /// Element handle.
    pub id: ElementId,
    /// Document bounds.
    pub bounds: Rect,
    /// Fill percentage.
    pub width: f32,
}

/// Statistic that counts up to `target`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CounterElement {
    /// Element handle.
    pub id: ElementId,
    /// Document bounds.
    pub bounds: Rect,
    /// Final value.
    pub target: u64,
}

/// Everything measurable about the page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Full scrollable height (px).
    pub document_height: f32,
    /// Anchored sections in document order.
    pub sections: Vec<Section>,
    /// Reveal-on-scroll elements.
    pub reveals: Vec<RevealElement>,
    /// Skill bars.
    pub skill_bars: Vec<SkillBar>,
    /// Counting statistics.
    pub counters: Vec<CounterElement>,
    /// Number of decorative parallax shapes.
    pub shapes: usize,
    /// Cards that lift on hover.
    pub hover_cards: Vec<ElementId>,
}

impl PageLayout {
    /// Parses a layout from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`folio_core::FolioError::Config`] if the text does not parse.
    pub fn from_toml_str(text: &str) -> FolioResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// True if `id` lifts on hover.
    #[must_use]
    pub fn is_hover_card(&self, id: ElementId) -> bool {
        self.hover_cards.contains(&id)
    }

    /// The shipped portfolio page at a 1280px wide viewport.
    ///
    /// Element ids: reveals `100..`, project cards `200..` (staggered by
    /// 200ms), gallery items `300..` (staggered by 100ms), skill bars
    /// `400..`, counters `500..`.
    #[must_use]
    pub fn portfolio() -> Self {
        let sections = vec![
            Section::new("home", 0.0, 900.0),
            Section::new("about", 900.0, 800.0),
            Section::new("skills", 1700.0, 900.0),
            Section::new("projects", 2600.0, 1100.0),
            Section::new("achievements", 3700.0, 700.0),
            Section::new("contact", 4400.0, 800.0),
        ];
        let document_height = sections.last().map_or(0.0, Section::bottom) + 200.0;

        let mut reveals = Vec::new();
        // Section headings fade in with no delay.
        for (i, section) in sections.iter().enumerate().skip(1) {
            reveals.push(RevealElement {
                id: ElementId(100 + i as u32),
                bounds: Rect::new(140.0, section.top + 80.0, 1000.0, 90.0),
                delay: 0.0,
            });
        }
        for i in 0..3 {
            reveals.push(RevealElement {
                id: ElementId(200 + i),
                bounds: Rect::new(140.0 + i as f32 * 340.0, 2800.0, 320.0, 420.0),
                delay: i as f32 * 0.2,
            });
        }
        for i in 0..6 {
            reveals.push(RevealElement {
                id: ElementId(300 + i),
                bounds: Rect::new(140.0 + (i % 3) as f32 * 340.0, 3850.0 + (i / 3) as f32 * 220.0, 320.0, 200.0),
                delay: i as f32 * 0.1,
            });
        }

        let skill_bars = [90.0, 85.0, 80.0, 75.0, 70.0, 60.0]
            .into_iter()
            .enumerate()
            .map(|(i, width)| SkillBar {
                id: ElementId(400 + i as u32),
                bounds: Rect::new(140.0 + (i % 2) as f32 * 520.0, 1900.0 + (i / 2) as f32 * 120.0, 480.0, 8.0),
                width,
            })
            .collect();

        let counters = [15_u64, 5, 1000]
            .into_iter()
            .enumerate()
            .map(|(i, target)| CounterElement {
                id: ElementId(500 + i as u32),
                bounds: Rect::new(140.0 + i as f32 * 340.0, 1400.0, 200.0, 80.0),
                target,
            })
            .collect();

        let hover_cards = (0..3).map(|i| ElementId(200 + i)).collect();

        Self {
            document_height,
            sections,
            reveals,
            skill_bars,
            counters,
            shapes: 4,
            hover_cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_layout_is_consistent() {
        let layout = PageLayout::portfolio();
        assert_eq!(layout.sections.len(), 6);
        assert!(layout.document_height >= 5200.0);
        assert!(layout
            .sections
            .windows(2)
            .all(|w| (w[0].bottom() - w[1].top).abs() < f32::EPSILON));
        assert!(layout.reveals.iter().all(|r| r.bounds.bottom() <= layout.document_height));
        assert!(layout.is_hover_card(ElementId(201)));
        assert!(!layout.is_hover_card(ElementId(400)));
    }

    #[test]
    fn test_staggered_delays() {
        let layout = PageLayout::portfolio();
        let delay = |id| layout.reveals.iter().find(|r| r.id == ElementId(id)).map(|r| r.delay);
        assert_eq!(delay(200), Some(0.0));
        assert!((delay(202).unwrap() - 0.4).abs() < 1e-6);
        assert!((delay(305).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_layout_from_toml() {
        let layout = PageLayout::from_toml_str(
            r#"
            document_height = 2000.0
            shapes = 2
            hover_cards = [7]

            [[sections]]
            name = "home"
            top = 0.0
            height = 1000.0

            [[reveals]]
            id = 10
            bounds = { x = 0.0, y = 1200.0, width = 100.0, height = 100.0 }

            [[counters]]
            id = 11
            bounds = { x = 0.0, y = 300.0, width = 100.0, height = 50.0 }
            target = 42
            "#,
        )
        .unwrap();
        assert_eq!(layout.sections[0].name, "home");
        assert_eq!(layout.reveals[0].id, ElementId(10));
        assert!(layout.reveals[0].delay.abs() < f32::EPSILON);
        assert_eq!(layout.counters[0].target, 42);
        assert!(layout.is_hover_card(ElementId(7)));
        assert!(layout.skill_bars.is_empty());
    }
}
