use std::sync::LazyLock;

use crate::models::{CandidateProfile, InternshipPosting};

pub const MAX_RESULTS: usize = 5;

static CATALOG: LazyLock<Vec<InternshipPosting>> = LazyLock::new(|| {
    vec![
        posting(
            1,
            "Frontend Developer Intern",
            "TechCorp India",
            "Bangalore",
            "6 months",
            "₹15,000/month",
            "Technology",
            "Work on modern web applications using React and JavaScript",
            &["Computer Skills", "Communication"],
            95,
            "Perfect match for your computer skills and technology interest",
        ),
        posting(
            2,
            "Digital Marketing Intern",
            "Growth Solutions",
            "Mumbai",
            "4 months",
            "₹12,000/month",
            "Marketing",
            "Learn social media marketing and content creation",
            &["Communication", "Computer Skills"],
            87,
            "Great fit for your communication skills and marketing interests",
        ),
        posting(
            3,
            "Data Entry Specialist",
            "InfoSys Ltd",
            "Remote",
            "3 months",
            "₹10,000/month",
            "Information Technology",
            "Handle data processing and administrative tasks",
            &["Computer Skills", "Accounting"],
            78,
            "Matches your computer and accounting skills",
        ),
    ]
});

#[allow(clippy::too_many_arguments)]
fn posting(
    id: i64,
    title: &str,
    company: &str,
    location: &str,
    duration: &str,
    stipend: &str,
    sector: &str,
    description: &str,
    requirements: &[&str],
    match_score: u8,
    match_reason: &str,
) -> InternshipPosting {
    InternshipPosting {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        duration: duration.to_string(),
        stipend: stipend.to_string(),
        sector: sector.to_string(),
        description: description.to_string(),
        requirements: requirements.iter().map(|r| r.to_string()).collect(),
        match_score: Some(match_score),
        match_reason: match_reason.to_string(),
    }
}

/// The offline catalog, in its fixed order.
pub fn catalog() -> &'static [InternshipPosting] {
    &CATALOG
}

/// Distinct catalog sectors, first-seen order.
pub fn sectors() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for p in catalog() {
        if !seen.contains(&p.sector.as_str()) {
            seen.push(p.sector.as_str());
        }
    }
    seen
}

/// Offline stand-in for the recommendation service.
///
/// Keeps catalog order, no scoring. A posting is kept when one of the
/// candidate's skills appears inside one of its requirements and the
/// location is acceptable. At most [`MAX_RESULTS`] postings come back.
pub fn match_profile(profile: &CandidateProfile) -> Vec<InternshipPosting> {
    match_in(catalog(), profile)
}

pub fn match_in(postings: &[InternshipPosting], profile: &CandidateProfile) -> Vec<InternshipPosting> {
    let skills: Vec<String> = profile
        .skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    let location = profile.location.to_lowercase();

    postings
        .iter()
        .filter(|p| skill_match(&skills, &p.requirements) && location_match(&location, &p.location))
        .take(MAX_RESULTS)
        .cloned()
        .collect()
}

fn skill_match(skills: &[String], requirements: &[String]) -> bool {
    requirements.iter().any(|req| {
        let req = req.to_lowercase();
        skills.iter().any(|skill| req.contains(skill.as_str()))
    })
}

fn location_match(wanted: &str, posting_location: &str) -> bool {
    let posting_location = posting_location.to_lowercase();
    wanted == "any" || posting_location.contains(wanted) || posting_location == "remote"
}
