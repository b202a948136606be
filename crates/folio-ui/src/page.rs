use rand::Rng;
use tracing::{debug, warn};

use folio_types::ContactMessage;

use crate::contact::{ContactFormWidget, SubmissionMode, SubmitOutcome};
use crate::nav::{Navigation, PageLayout};
use crate::notification::{Notifier, Toast};
use crate::particles::{self, PARTICLE_COUNT, Particle};
use crate::projects::{Filter, ProjectCard, ProjectGallery};
use crate::scheduler::Scheduler;
use crate::theme::{PreferenceStore, ThemeController};
use crate::typing::TypingEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

/// Element that had focus when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    ThemeToggle,
    Document,
}

/// Something the visitor (or the outside world) did.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Input { field: Field, value: String },
    Submit,
    CloseToast,
    ThemeToggleClick,
    KeyDown { target: KeyTarget, key: String, alt: bool },
    SystemThemeChanged { prefers_dark: bool },
    Scroll { y: f64 },
    HamburgerClick,
    /// A link inside the nav menu.
    NavLinkClick { href: String },
    /// Any other in-page `#anchor` link.
    AnchorClick { href: String },
    /// A click anywhere outside the menu and the hamburger.
    OutsideClick,
    BackToTopClick,
    /// Raw `data-filter` value of the clicked button.
    FilterClick { filter: String },
    /// Endpoint reply for a delivered message: body on success, reason on failure.
    ServerReplied(Result<String, String>),
    Leave,
}

/// Work the page can't do itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Deliver(ContactMessage),
    ScrollTo(f64),
}

/// Deferred work queued on the page's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    AutoDismissToast(u64),
    RemoveToast(u64),
    FinishSimulatedSubmission,
    EndThemeTransition,
    TypeTick,
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub mode: SubmissionMode,
    pub system_prefers_dark: bool,
    pub layout: PageLayout,
    pub projects: Vec<ProjectCard>,
    pub particle_count: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            mode: SubmissionMode::Simulated,
            system_prefers_dark: false,
            layout: PageLayout::default(),
            projects: Vec::new(),
            particle_count: PARTICLE_COUNT,
        }
    }
}

/// All widget state for one page view.
#[derive(Debug)]
pub struct Page {
    sched: Scheduler<Task>,
    notifier: Notifier,
    contact: ContactFormWidget,
    theme: ThemeController,
    typing: TypingEffect,
    nav: Navigation,
    gallery: ProjectGallery,
    particles: Vec<Particle>,
    started: bool,
}

impl Page {
    pub fn new<R: Rng>(config: PageConfig, prefs: Box<dyn PreferenceStore>, rng: &mut R) -> Self {
        Self {
            sched: Scheduler::new(),
            notifier: Notifier::new(),
            contact: ContactFormWidget::new(config.mode),
            theme: ThemeController::new(prefs, config.system_prefers_dark),
            typing: TypingEffect::default(),
            nav: Navigation::new(config.layout),
            gallery: ProjectGallery::new(config.projects),
            particles: particles::scatter(rng, config.particle_count),
            started: false,
        }
    }

    /// Content loaded: start the typing animation. Later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.sched.schedule(0, Task::TypeTick);
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        debug!("Page event at {}ms: {:?}", self.sched.now(), event);
        let mut effects = Vec::new();

        match event {
            UiEvent::Input { field, value } => {
                let fields = &mut self.contact.fields;
                match field {
                    Field::Name => fields.name = value,
                    Field::Email => fields.email = value,
                    Field::Subject => fields.subject = value,
                    Field::Message => fields.message = value,
                }
            }
            UiEvent::Submit => {
                if let SubmitOutcome::Deliver(message) =
                    self.contact.submit(&mut self.sched, &mut self.notifier)
                {
                    effects.push(Effect::Deliver(message));
                }
            }
            UiEvent::CloseToast => {
                if let Some(id) = self.notifier.current().map(|t| t.id) {
                    self.notifier.dismiss(id, &mut self.sched);
                }
            }
            UiEvent::ThemeToggleClick => {
                self.theme.toggle(&mut self.sched, &mut self.notifier);
            }
            UiEvent::KeyDown { target, key, alt } => {
                let activates_toggle =
                    target == KeyTarget::ThemeToggle && (key == "Enter" || key == " ");
                let shortcut = alt && key == "t";
                if activates_toggle || shortcut {
                    self.theme.toggle(&mut self.sched, &mut self.notifier);
                }
            }
            UiEvent::SystemThemeChanged { prefers_dark } => {
                self.theme.on_system_change(prefers_dark);
            }
            UiEvent::Scroll { y } => self.nav.on_scroll(y),
            UiEvent::HamburgerClick => self.nav.toggle_menu(),
            UiEvent::NavLinkClick { href } => {
                self.nav.close_menu();
                effects.extend(self.nav.anchor_target(&href).map(Effect::ScrollTo));
            }
            UiEvent::AnchorClick { href } => {
                effects.extend(self.nav.anchor_target(&href).map(Effect::ScrollTo));
            }
            UiEvent::OutsideClick => self.nav.close_menu(),
            UiEvent::BackToTopClick => effects.push(Effect::ScrollTo(0.0)),
            UiEvent::FilterClick { filter } => {
                let filter = filter.parse::<Filter>().unwrap_or_else(|e| {
                    warn!("Filter matches no category: {}", e);
                    Filter::Unlisted
                });
                self.gallery.apply(filter);
            }
            UiEvent::ServerReplied(reply) => {
                self.contact
                    .complete(reply.map(|_| ()), &mut self.sched, &mut self.notifier);
            }
            UiEvent::Leave => {
                let cancelled = self.contact.abandon(&mut self.sched);
                debug!("Left page, cancelled {} pending submissions", cancelled);
            }
        }

        effects
    }

    pub fn advance(&mut self, ms: u64) {
        let until = self.sched.now() + ms;
        self.advance_to(until);
    }

    /// Run every task due up to `until` (page clock, in ms).
    pub fn advance_to(&mut self, until: u64) {
        while let Some(task) = self.sched.pop_due(until) {
            self.run_task(task);
        }
        self.sched.settle(until);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::AutoDismissToast(id) => self.notifier.on_auto_dismiss(id, &mut self.sched),
            Task::RemoveToast(id) => self.notifier.on_remove(id),
            Task::FinishSimulatedSubmission => {
                self.contact.on_simulated_finish(&mut self.sched, &mut self.notifier)
            }
            Task::EndThemeTransition => self.theme.end_transition(),
            Task::TypeTick => {
                let delay = self.typing.tick();
                self.sched.schedule(delay, Task::TypeTick);
            }
        }
    }

    pub fn now(&self) -> u64 {
        self.sched.now()
    }

    pub fn next_deadline(&mut self) -> Option<u64> {
        self.sched.next_deadline()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.notifier.current()
    }

    pub fn contact(&self) -> &ContactFormWidget {
        &self.contact
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn typing(&self) -> &TypingEffect {
        &self.typing
    }

    pub fn nav(&self) -> &Navigation {
        &self.nav
    }

    pub fn gallery(&self) -> &ProjectGallery {
        &self.gallery
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
