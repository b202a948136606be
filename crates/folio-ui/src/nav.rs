use tracing::debug;

const NAVBAR_SOLID_AFTER: f64 = 100.0;
const BACK_TO_TOP_AFTER: f64 = 500.0;
/// A section counts as current this far before its top reaches the viewport.
const SECTION_LEAD: f64 = 150.0;
/// Height of the fixed navbar, kept clear when jumping to an anchor.
const ANCHOR_OFFSET: f64 = 80.0;
const SKILLS_REVEAL_MARGIN: f64 = 200.0;
/// Bottom of the viewport is pulled in this far before a block counts as seen.
const REVEAL_BOTTOM_INSET: f64 = 50.0;
/// Share of a block's height that must be on screen to reveal it.
const REVEAL_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }
}

/// Measured page geometry, in CSS pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub sections: Vec<Section>,
    pub viewport_height: f64,
    pub skills_top: Option<f64>,
    /// Target percentage of each skill bar.
    pub skill_levels: Vec<u8>,
    /// Content blocks that fade in the first time they scroll into view.
    pub reveal: Vec<Section>,
}

/// Navbar, back-to-top button, skill bars and the mobile menu.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    layout: PageLayout,
    scroll_y: f64,
    navbar_scrolled: bool,
    back_to_top_visible: bool,
    active_section: Option<String>,
    skills_animated: bool,
    revealed: Vec<bool>,
    menu_open: bool,
}

impl Navigation {
    /// Blocks already on screen at the top of the page are revealed at once.
    pub fn new(layout: PageLayout) -> Self {
        let revealed = vec![false; layout.reveal.len()];
        let mut nav = Self {
            layout,
            revealed,
            ..Self::default()
        };
        nav.reveal_visible(0.0);
        nav
    }

    pub fn on_scroll(&mut self, y: f64) {
        self.scroll_y = y;
        self.navbar_scrolled = y > NAVBAR_SOLID_AFTER;
        self.back_to_top_visible = y > BACK_TO_TOP_AFTER;

        // Later sections win when ranges overlap.
        self.active_section = self
            .layout
            .sections
            .iter()
            .rev()
            .find(|s| {
                let top = s.top - SECTION_LEAD;
                y >= top && y < top + s.height
            })
            .map(|s| s.id.clone());

        if let Some(skills_top) = self.layout.skills_top {
            let reveal_at = skills_top - self.layout.viewport_height + SKILLS_REVEAL_MARGIN;
            if !self.skills_animated && y >= reveal_at {
                debug!("Animating skill bars at y={}", y);
                self.skills_animated = true;
            }
        }

        self.reveal_visible(y);
    }

    fn reveal_visible(&mut self, y: f64) {
        let view_top = y;
        let view_bottom = y + self.layout.viewport_height - REVEAL_BOTTOM_INSET;

        for (block, revealed) in self.layout.reveal.iter().zip(self.revealed.iter_mut()) {
            if *revealed {
                continue;
            }
            let bottom = block.top + block.height;
            let visible = bottom.min(view_bottom) - block.top.max(view_top);
            let seen = if block.height > 0.0 {
                visible >= block.height * REVEAL_THRESHOLD
            } else {
                block.top >= view_top && block.top <= view_bottom
            };
            if seen {
                debug!("Revealing {} at y={}", block.id, y);
                *revealed = true;
            }
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.navbar_scrolled
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.back_to_top_visible
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    /// Current width of each skill bar, in percent. Zero until revealed.
    pub fn skill_widths(&self) -> Vec<u8> {
        if self.skills_animated {
            self.layout.skill_levels.clone()
        } else {
            vec![0; self.layout.skill_levels.len()]
        }
    }

    /// Whether the block with this id has faded in. Stays true once set.
    pub fn is_revealed(&self, id: &str) -> bool {
        self.layout
            .reveal
            .iter()
            .zip(&self.revealed)
            .any(|(block, revealed)| block.id == id && *revealed)
    }

    /// Scroll target for an in-page link like `#about`.
    pub fn anchor_target(&self, href: &str) -> Option<f64> {
        let id = href.strip_prefix('#')?;
        self.layout
            .sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.top - ANCHOR_OFFSET)
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}
