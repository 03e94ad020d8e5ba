use thiserror::Error;

use crate::models::CandidateProfile;

/// The first required field found missing. Display text is shown to the user as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select your education level")]
    MissingEducation,
    #[error("Please select your preferred location")]
    MissingLocation,
    #[error("Please select at least one skill")]
    NoSkills,
    #[error("Please select at least one area of interest")]
    NoInterests,
}

/// Checks run in a fixed order and stop at the first failure.
pub fn validate(profile: &CandidateProfile) -> Result<(), ValidationError> {
    if profile.education.trim().is_empty() {
        return Err(ValidationError::MissingEducation);
    }
    if profile.location.trim().is_empty() {
        return Err(ValidationError::MissingLocation);
    }
    if profile.skills.is_empty() {
        return Err(ValidationError::NoSkills);
    }
    if profile.interests.is_empty() {
        return Err(ValidationError::NoInterests);
    }
    Ok(())
}
