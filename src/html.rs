//! Markup for a results view, for pages that embed the recommendations.
//!
//! The fragment calls two page-level functions: `applyToInternship(id)` on each
//! card and `showForm()` on the new-search button.

use crate::view::{NO_RESULTS_HINT, NO_RESULTS_TITLE, PostingCard, ResultsView};

const DETAIL_ICONS: [&str; 4] = ["📍", "⏰", "💰", "🏢"];

pub fn render_fragment(view: &ResultsView) -> String {
    let mut out = String::new();
    match view {
        ResultsView::Empty => {
            out.push_str("<div class=\"no-results\">\n");
            out.push_str("  <div class=\"no-results-icon\">😔</div>\n");
            out.push_str(&format!("  <h3>{}</h3>\n", esc(NO_RESULTS_TITLE)));
            out.push_str(&format!("  <p>{}</p>\n", esc(NO_RESULTS_HINT)));
            out.push_str("</div>\n");
        }
        ResultsView::Cards(cards) => {
            for card in cards {
                out.push_str(&render_card(card));
            }
        }
    }
    out.push_str("<button class=\"new-search-btn\" onclick=\"showForm()\">New Search</button>\n");
    out
}

fn render_card(card: &PostingCard) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"recommendation-card\">\n");
    out.push_str(&format!("  <h3>{}</h3>\n", esc(&card.title)));
    out.push_str(&format!("  <div class=\"company\">{}</div>\n", esc(&card.company)));
    if let Some(score) = card.match_score {
        out.push_str(&format!("  <div class=\"match-score\">{}% match</div>\n", score));
    }

    out.push_str("  <div class=\"details\">\n");
    for ((_, value), icon) in card.details().iter().zip(DETAIL_ICONS) {
        out.push_str(&format!("    <div class=\"detail-item\">{} {}</div>\n", icon, esc(value)));
    }
    out.push_str("  </div>\n");

    out.push_str("  <div class=\"match-reason\">\n");
    out.push_str("    <div class=\"reason-title\">✨ Why this matches you:</div>\n");
    out.push_str(&format!("    <div class=\"reason-text\">{}</div>\n", esc(&card.match_reason)));
    out.push_str("  </div>\n");

    out.push_str(&format!("  <p class=\"description\">{}</p>\n", esc(&card.summary)));
    out.push_str(&format!(
        "  <button class=\"apply-btn\" onclick=\"applyToInternship({})\">🚀 Apply Now</button>\n",
        card.id
    ));
    out.push_str("</div>\n");
    out
}

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{matcher, view};

    #[test]
    fn test_empty_view_has_no_cards() {
        let html = render_fragment(&ResultsView::Empty);
        assert!(html.contains("No matches found"));
        assert!(!html.contains("recommendation-card"));
        assert!(html.contains("onclick=\"showForm()\""));
    }

    #[test]
    fn test_one_card_per_posting_with_apply_trigger() {
        let html = render_fragment(&view::render(matcher::catalog()));
        assert_eq!(html.matches("class=\"recommendation-card\"").count(), 3);
        assert!(html.contains("onclick=\"applyToInternship(1)\""));
        assert!(html.contains("onclick=\"applyToInternship(3)\""));
        assert!(html.contains("📍 Bangalore"));
        assert!(html.contains("95% match"));
    }

    #[test]
    fn test_cards_appear_in_order() {
        let html = render_fragment(&view::render(matcher::catalog()));
        let first = html.find("Frontend Developer Intern").unwrap();
        let second = html.find("Digital Marketing Intern").unwrap();
        let third = html.find("Data Entry Specialist").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_service_text_is_escaped() {
        let mut posting = matcher::catalog()[0].clone();
        posting.title = "<script>alert('x')</script>".to_string();
        posting.company = "R&D \"Labs\"".to_string();
        let html = render_fragment(&view::render(&[posting]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("R&amp;D &quot;Labs&quot;"));
    }
}
