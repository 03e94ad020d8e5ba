use serde::{Deserialize, Serialize};

/// What the candidate told us on the form. Built fresh for every submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub education: String,
    pub skills: Vec<String>,    // checked order
    pub interests: Vec<String>, // checked order
    pub location: String,       // "any" means no preference
}

/// A posting as the service sends it. Only the envelope is checked; a posting
/// with missing or oddly typed fields still comes through, blanks filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipPosting {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub stipend: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sector: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub requirements: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::score",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_score: Option<u8>, // 0-100, display only
    #[serde(default, deserialize_with = "lenient::string")]
    pub match_reason: String,
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(text(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().filter_map(text).collect(),
            Value::String(s) => vec![s],
            _ => Vec::new(),
        })
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value.as_i64() {
            Some(id) => id,
            None => number(&value).map(|n| n as i64).unwrap_or_default(),
        })
    }

    pub fn score<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u8>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(number(&value)
            .filter(|n| n.is_finite())
            .map(|n| n.round().clamp(0.0, 100.0) as u8))
    }
}

/// Body returned by `POST /recommend`. Every field is optional on the wire;
/// a missing `success` counts as false.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<InternshipPosting>,
    pub error: Option<String>,
    #[allow(dead_code)]
    pub total: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_to_request_shape() {
        let profile = CandidateProfile {
            education: "Bachelor's".to_string(),
            skills: vec!["computer skills".to_string()],
            interests: vec!["technology".to_string()],
            location: "bangalore".to_string(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "education": "Bachelor's",
                "skills": ["computer skills"],
                "interests": ["technology"],
                "location": "bangalore"
            })
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let body: RecommendResponse = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert!(!body.success);
        assert!(body.recommendations.is_empty());
        assert_eq!(body.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_posting_without_score_or_reason() {
        let json = r#"{
            "id": 7, "title": "Ops Intern", "company": "Acme", "location": "Pune",
            "duration": "2 months", "stipend": "None", "sector": "Operations",
            "description": "Help out"
        }"#;
        let posting: InternshipPosting = serde_json::from_str(json).unwrap();
        assert_eq!(posting.match_score, None);
        assert!(posting.requirements.is_empty());
        assert_eq!(posting.match_reason, "");
    }

    #[test]
    fn test_posting_with_missing_and_loose_fields() {
        let json = r#"{
            "id": "12", "title": "Field Intern", "company": null, "location": "Delhi",
            "duration": 3, "sector": "Agriculture", "requirements": ["Teamwork", 5, null],
            "match_score": 72.6
        }"#;
        let posting: InternshipPosting = serde_json::from_str(json).unwrap();
        assert_eq!(posting.id, 12);
        assert_eq!(posting.company, "");
        assert_eq!(posting.duration, "3");
        assert_eq!(posting.stipend, "");
        assert_eq!(posting.description, "");
        assert_eq!(posting.requirements, vec!["Teamwork", "5"]);
        assert_eq!(posting.match_score, Some(73));
    }

    #[test]
    fn test_score_out_of_range_or_garbage() {
        let high: InternshipPosting = serde_json::from_str(r#"{"id": 1, "match_score": 140}"#).unwrap();
        assert_eq!(high.match_score, Some(100));
        let junk: InternshipPosting = serde_json::from_str(r#"{"id": 1.0, "match_score": "n/a"}"#).unwrap();
        assert_eq!(junk.id, 1);
        assert_eq!(junk.match_score, None);
    }

    #[test]
    fn test_malformed_envelope_still_rejected() {
        assert!(serde_json::from_str::<RecommendResponse>(r#"{"success": "yes"}"#).is_err());
        assert!(
            serde_json::from_str::<RecommendResponse>(r#"{"success": true, "recommendations": 3}"#)
                .is_err()
        );
    }
}
