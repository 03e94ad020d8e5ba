use crate::models::{CandidateProfile, InternshipPosting};
use crate::validate::{self, ValidationError};
use crate::view::{self, PostingCard, ResultsView};

pub const APPLY_PLACEHOLDER: &str =
    "This will redirect you to the application page. Feature coming soon!";
pub const LOAD_FAILED: &str = "Failed to get recommendations. Please try again.";

/// Exactly one panel is visible at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Form,
    Loading,
    Results(Vec<PostingCard>),
    NoResults,
}

impl Panel {
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Form => "form",
            Panel::Loading => "loading",
            Panel::Results(_) => "results",
            Panel::NoResults => "no-results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Info,
}

/// A blocking message drawn over the current panel until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub panel: Panel,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Submit,
    Invalid(ValidationError),
    Loaded(Vec<InternshipPosting>),
    Failed(String),
    NewSearch,
    Apply(i64),
    Dismiss,
}

fn warn(message: impl Into<String>) -> Option<Notice> {
    Some(Notice { kind: NoticeKind::Warning, message: message.into() })
}

/// Events that make no sense for the current panel leave the state untouched.
pub fn transition(state: ViewState, event: Event) -> ViewState {
    match (state.panel, event) {
        (Panel::Form, Event::Submit) => ViewState { panel: Panel::Loading, notice: None },
        (Panel::Form, Event::Invalid(err)) => ViewState {
            panel: Panel::Form,
            notice: warn(err.to_string()),
        },
        (Panel::Loading, Event::Loaded(postings)) => {
            let panel = match view::render(&postings) {
                ResultsView::Cards(cards) => Panel::Results(cards),
                ResultsView::Empty => Panel::NoResults,
            };
            ViewState { panel, notice: None }
        }
        (Panel::Loading, Event::Failed(message)) => {
            let message = if message.trim().is_empty() { LOAD_FAILED.to_string() } else { message };
            ViewState { panel: Panel::Form, notice: warn(message) }
        }
        (Panel::Results(_) | Panel::NoResults, Event::NewSearch) => ViewState {
            panel: Panel::Form,
            notice: None,
        },
        (Panel::Results(cards), Event::Apply(id)) => {
            let notice = cards.iter().any(|c| c.id == id).then(|| Notice {
                kind: NoticeKind::Info,
                message: APPLY_PLACEHOLDER.to_string(),
            });
            ViewState { notice: notice.or(state.notice), panel: Panel::Results(cards) }
        }
        (panel, Event::Dismiss) => ViewState { panel, notice: None },
        (panel, _) => ViewState { panel, notice: state.notice },
    }
}

/// Owns the view state. The only place it changes.
#[derive(Debug, Default)]
pub struct Controller {
    state: ViewState,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn panel(&self) -> &Panel {
        &self.state.panel
    }

    pub fn dispatch(&mut self, event: Event) {
        let before = self.state.panel.name();
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, event);
        if before != self.state.panel.name() {
            tracing::debug!(from = before, to = self.state.panel.name(), "view transition");
        }
    }

    /// Validates and, when the form is showing and the profile is complete,
    /// moves to Loading and hands the profile back for the one request to send.
    pub fn submit(&mut self, profile: CandidateProfile) -> Option<CandidateProfile> {
        if self.state.panel != Panel::Form || self.state.notice.is_some() {
            return None;
        }
        match validate::validate(&profile) {
            Ok(()) => {
                self.dispatch(Event::Submit);
                Some(profile)
            }
            Err(err) => {
                tracing::debug!("validation failed: {}", err);
                self.dispatch(Event::Invalid(err));
                None
            }
        }
    }
}
