use std::fmt;
use std::str::FromStr;

use folio_types::{ParseUiValueError, ProjectCategory};

/// Stagger between consecutive cards' fade-in.
const FADE_STAGGER_MS: u64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(ProjectCategory),
    /// A `data-filter` value naming no known category. Matches nothing.
    Unlisted,
}

impl Filter {
    pub fn matches(self, category: ProjectCategory) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(c) => c == category,
            Filter::Unlisted => false,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(c) => fmt::Display::fmt(c, f),
            Filter::Unlisted => f.write_str("unlisted"),
        }
    }
}

impl FromStr for Filter {
    type Err = ParseUiValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            other => other.parse().map(Filter::Only),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub title: String,
    pub category: ProjectCategory,
}

impl ProjectCard {
    pub fn new(title: impl Into<String>, category: ProjectCategory) -> Self {
        Self { title: title.into(), category }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    Hidden,
    /// Shown, fading in after the given delay.
    Shown { fade_delay_ms: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct ProjectGallery {
    cards: Vec<ProjectCard>,
    active: Filter,
    views: Vec<CardView>,
}

impl ProjectGallery {
    pub fn new(cards: Vec<ProjectCard>) -> Self {
        let views = vec![CardView::Shown { fade_delay_ms: 0 }; cards.len()];
        Self {
            cards,
            active: Filter::All,
            views,
        }
    }

    pub fn active(&self) -> Filter {
        self.active
    }

    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    pub fn views(&self) -> &[CardView] {
        &self.views
    }

    /// The stagger follows each card's position in the full list, not
    /// among the visible ones.
    pub fn apply(&mut self, filter: Filter) -> &[CardView] {
        self.active = filter;
        self.views = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                if filter.matches(card.category) {
                    CardView::Shown { fade_delay_ms: i as u64 * FADE_STAGGER_MS }
                } else {
                    CardView::Hidden
                }
            })
            .collect();
        &self.views
    }
}
