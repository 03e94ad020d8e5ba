//! Turns postings into what the screen shows, without touching a screen.

use crate::models::InternshipPosting;

pub const SUMMARY_CHARS: usize = 120;

pub const NO_RESULTS_TITLE: &str = "No matches found";
pub const NO_RESULTS_HINT: &str =
    "Try selecting different skills or interests to find more internships.";

/// One result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingCard {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub duration: String,
    pub stipend: String,
    pub sector: String,
    pub match_reason: String,
    pub match_score: Option<u8>,
    pub summary: String,
}

impl PostingCard {
    pub fn details(&self) -> [(&'static str, &str); 4] {
        [
            ("Location", self.location.as_str()),
            ("Duration", self.duration.as_str()),
            ("Stipend", self.stipend.as_str()),
            ("Sector", self.sector.as_str()),
        ]
    }
}

impl From<&InternshipPosting> for PostingCard {
    fn from(p: &InternshipPosting) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            company: p.company.clone(),
            location: p.location.clone(),
            duration: p.duration.clone(),
            stipend: p.stipend.clone(),
            sector: p.sector.clone(),
            match_reason: p.match_reason.clone(),
            match_score: p.match_score.map(|s| s.min(100)),
            summary: truncate(p.description.trim(), SUMMARY_CHARS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Cards(Vec<PostingCard>),
    Empty,
}

impl ResultsView {
    pub fn cards(&self) -> &[PostingCard] {
        match self {
            ResultsView::Cards(cards) => cards,
            ResultsView::Empty => &[],
        }
    }
}

/// An empty list always becomes [`ResultsView::Empty`], never zero cards.
pub fn render(postings: &[InternshipPosting]) -> ResultsView {
    if postings.is_empty() {
        ResultsView::Empty
    } else {
        ResultsView::Cards(postings.iter().map(PostingCard::from).collect())
    }
}

/// Cuts on a char boundary and marks the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept.trim_end())
    }
}
