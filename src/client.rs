use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::matcher;
use crate::models::{CandidateProfile, InternshipPosting, RecommendResponse};

const GENERIC_FAILURE: &str = "Failed to get recommendations";

/// Why the live service could not be used.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(StatusCode),

    #[error("{0}")]
    Declined(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Where a list of postings came from.
#[derive(Debug)]
pub enum Recommendation {
    Live(Vec<InternshipPosting>),
    Fallback {
        reason: TransportError,
        postings: Vec<InternshipPosting>,
    },
}

impl Recommendation {
    pub fn postings(&self) -> &[InternshipPosting] {
        match self {
            Recommendation::Live(postings) => postings,
            Recommendation::Fallback { postings, .. } => postings,
        }
    }

    pub fn into_postings(self) -> Vec<InternshipPosting> {
        match self {
            Recommendation::Live(postings) => postings,
            Recommendation::Fallback { postings, .. } => postings,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Recommendation::Fallback { .. })
    }
}

/// Anything that can turn a validated profile into postings.
pub trait RecommendationSource: Send + Sync {
    fn recommend(&self, profile: &CandidateProfile) -> Recommendation;
}

pub struct RecommendationClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl RecommendationClient {
    pub fn new(api_base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            endpoint: format!("{}/recommend", api_base_url.trim_end_matches('/')),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Asks the live service only. Every failure is reported, nothing falls back.
    pub fn fetch(&self, profile: &CandidateProfile) -> Result<Vec<InternshipPosting>, TransportError> {
        tracing::debug!("POST {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(profile).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let text = response.text()?;
        let body: RecommendResponse =
            serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))?;

        if !body.success {
            let message = body
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(TransportError::Declined(message));
        }

        Ok(body.recommendations)
    }
}

impl RecommendationSource for RecommendationClient {
    fn recommend(&self, profile: &CandidateProfile) -> Recommendation {
        match self.fetch(profile) {
            Ok(postings) => {
                tracing::info!(count = postings.len(), "recommendations received");
                Recommendation::Live(postings)
            }
            Err(reason) => {
                tracing::warn!("API not available, showing offline catalog: {}", reason);
                Recommendation::Fallback {
                    postings: matcher::match_profile(profile),
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::thread;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            education: "Bachelor's".to_string(),
            skills: vec!["computer skills".to_string()],
            interests: vec!["technology".to_string()],
            location: "bangalore".to_string(),
        }
    }

    fn client_for(server: &mockito::Server) -> RecommendationClient {
        RecommendationClient::new(&server.url(), Some(Duration::from_secs(5))).unwrap()
    }

    const LIVE_BODY: &str = r#"{
        "success": true,
        "total": 1,
        "recommendations": [{
            "id": 42, "title": "Backend Intern", "company": "Acme", "location": "Pune",
            "duration": "3 months", "stipend": "₹8,000/month", "sector": "Technology",
            "description": "APIs", "requirements": ["Python"], "match_score": 61,
            "match_reason": "Good skills alignment (50%)"
        }]
    }"#;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = RecommendationClient::new("http://localhost:5000/api/", None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/api/recommend");
    }

    #[test]
    fn test_live_recommendations_returned_verbatim() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/recommend")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "education": "Bachelor's",
                "skills": ["computer skills"],
                "interests": ["technology"],
                "location": "bangalore"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LIVE_BODY)
            .expect(1)
            .create();

        let result = client_for(&server).recommend(&profile());

        mock.assert();
        assert!(!result.is_fallback());
        let postings = result.into_postings();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].id, 42);
        assert_eq!(postings[0].match_score, Some(61));
    }

    #[test]
    fn test_live_posting_with_missing_field_is_kept() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/recommend")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success": true, "recommendations": [{
                    "id": 77, "title": "Field Intern", "company": "Agro Co", "location": "Nagpur",
                    "duration": "2 months", "sector": "Agriculture", "description": "Farm surveys",
                    "requirements": ["Teamwork"], "match_reason": "Matches your interest in Agriculture"
                }]}"#,
            )
            .create();

        let result = client_for(&server).recommend(&profile());

        assert!(!result.is_fallback(), "live list was replaced: {:?}", result);
        let postings = result.into_postings();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].id, 77);
        assert_eq!(postings[0].title, "Field Intern");
        assert_eq!(postings[0].stipend, "");
    }

    #[test]
    fn test_live_empty_list_is_not_a_fallback() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/recommend")
            .with_status(200)
            .with_body(r#"{"success": true, "recommendations": []}"#)
            .create();

        let result = client_for(&server).recommend(&profile());
        assert!(!result.is_fallback());
        assert!(result.postings().is_empty());
    }

    #[test]
    fn test_error_status_falls_back_to_catalog() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/recommend")
            .with_status(500)
            .with_body(r#"{"error": "engine exploded"}"#)
            .create();

        let result = client_for(&server).recommend(&profile());
        match &result {
            Recommendation::Fallback { reason, .. } => {
                assert!(matches!(reason, TransportError::Status(s) if s.as_u16() == 500));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
        assert_eq!(result.into_postings(), matcher::match_profile(&profile()));
    }

    #[test]
    fn test_declined_carries_service_message() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/recommend")
            .with_status(200)
            .with_body(r#"{"success": false, "error": "Missing required field: skills"}"#)
            .create();

        let err = client_for(&server).fetch(&profile()).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: skills");
    }

    #[test]
    fn test_declined_without_message_uses_generic_text() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/recommend")
            .with_status(200)
            .with_body(r#"{"success": false}"#)
            .create();

        let client = client_for(&server);
        let err = client.fetch(&profile()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to get recommendations");
        assert!(client.recommend(&profile()).is_fallback());
    }

    #[test]
    fn test_malformed_body_falls_back() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/recommend")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create();

        let result = client_for(&server).recommend(&profile());
        assert!(matches!(
            result,
            Recommendation::Fallback { reason: TransportError::Decode(_), .. }
        ));
    }

    #[test]
    fn test_unreachable_service_falls_back() {
        // Nothing listens on port 9 locally
        let client =
            RecommendationClient::new("http://127.0.0.1:9/api", Some(Duration::from_secs(2)))
                .unwrap();
        let result = client.recommend(&profile());

        assert!(matches!(
            result,
            Recommendation::Fallback { reason: TransportError::Request(_), .. }
        ));
        assert_eq!(result.into_postings(), matcher::match_profile(&profile()));
    }

    #[test]
    fn test_silent_service_times_out_and_falls_back() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept the connection and never answer
        thread::spawn(move || {
            let held: Vec<_> = listener.incoming().take(1).collect();
            thread::sleep(Duration::from_secs(5));
            drop(held);
        });

        let base = format!("http://{}/api", addr);
        let client = RecommendationClient::new(&base, Some(Duration::from_millis(200))).unwrap();
        let result = client.recommend(&profile());

        assert!(matches!(
            result,
            Recommendation::Fallback { reason: TransportError::Request(_), .. }
        ));
        assert_eq!(result.into_postings(), matcher::match_profile(&profile()));
    }
}
