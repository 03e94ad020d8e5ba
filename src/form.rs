use crate::models::CandidateProfile;

/// A selectable value and the label shown next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

pub const EDUCATION: &[Choice] = &[
    choice("10th", "10th Pass"),
    choice("12th", "12th Pass"),
    choice("Diploma", "Diploma"),
    choice("Bachelor's", "Bachelor's Degree"),
    choice("Master's", "Master's Degree"),
];

pub const LOCATIONS: &[Choice] = &[
    choice("any", "Anywhere in India"),
    choice("remote", "Remote"),
    choice("bangalore", "Bangalore"),
    choice("mumbai", "Mumbai"),
    choice("delhi", "Delhi"),
    choice("pune", "Pune"),
    choice("chennai", "Chennai"),
    choice("hyderabad", "Hyderabad"),
    choice("kolkata", "Kolkata"),
];

pub const SKILLS: &[Choice] = &[
    choice("computer skills", "Computer Skills"),
    choice("communication", "Communication"),
    choice("accounting", "Accounting"),
    choice("data entry", "Data Entry"),
    choice("teamwork", "Teamwork"),
    choice("problem solving", "Problem Solving"),
];

pub const INTERESTS: &[Choice] = &[
    choice("technology", "Technology"),
    choice("marketing", "Marketing"),
    choice("finance", "Finance"),
    choice("healthcare", "Healthcare"),
    choice("education", "Education"),
    choice("manufacturing", "Manufacturing"),
];

/// A single-value control. `None` is the "-- select --" placeholder.
#[derive(Debug, Clone)]
pub struct SelectField {
    pub options: &'static [Choice],
    pub selected: Option<usize>,
}

impl SelectField {
    fn new(options: &'static [Choice]) -> Self {
        Self { options, selected: None }
    }

    pub fn value(&self) -> &'static str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|c| c.value)
            .unwrap_or("")
    }

    pub fn label(&self) -> &'static str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|c| c.label)
            .unwrap_or("-- select --")
    }

    /// Cycles through the placeholder and every option.
    pub fn next(&mut self) {
        self.selected = match self.selected {
            None if !self.options.is_empty() => Some(0),
            Some(i) if i + 1 < self.options.len() => Some(i + 1),
            _ => None,
        };
    }

    pub fn prev(&mut self) {
        self.selected = match self.selected {
            None => self.options.len().checked_sub(1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }
}

/// A named group of checkboxes. Checked values are reported in option order.
#[derive(Debug, Clone)]
pub struct CheckboxGroup {
    pub options: &'static [Choice],
    pub checked: Vec<bool>,
}

impl CheckboxGroup {
    fn new(options: &'static [Choice]) -> Self {
        Self { options, checked: vec![false; options.len()] }
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.checked.get_mut(index) {
            *flag = !*flag;
        }
    }

    pub fn checked_values(&self) -> Vec<String> {
        self.options
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(c, _)| c.value.to_string())
            .collect()
    }
}

/// The controls of the candidate form.
#[derive(Debug, Clone)]
pub struct FormState {
    pub education: SelectField,
    pub skills: CheckboxGroup,
    pub interests: CheckboxGroup,
    pub location: SelectField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            education: SelectField::new(EDUCATION),
            skills: CheckboxGroup::new(SKILLS),
            interests: CheckboxGroup::new(INTERESTS),
            location: SelectField::new(LOCATIONS),
        }
    }
}

impl FormState {
    /// Reads the current control state. No validation happens here.
    pub fn collect(&self) -> CandidateProfile {
        CandidateProfile {
            education: self.education.value().to_string(),
            skills: self.skills.checked_values(),
            interests: self.interests.checked_values(),
            location: self.location.value().to_string(),
        }
    }
}

/// Builds a profile from command line values, keeping the order they were given in.
pub fn from_args(
    education: Option<&str>,
    skills: &[String],
    interests: &[String],
    location: Option<&str>,
) -> CandidateProfile {
    let clean = |values: &[String]| -> Vec<String> {
        values
            .iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    };

    CandidateProfile {
        education: education.map(str::trim).unwrap_or_default().to_string(),
        skills: clean(skills),
        interests: clean(interests),
        location: location.map(str::trim).unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_collects_empty_profile() {
        let profile = FormState::default().collect();
        assert_eq!(profile, CandidateProfile::default());
    }

    #[test]
    fn test_checked_values_follow_option_order() {
        let mut form = FormState::default();
        form.skills.toggle(2); // accounting
        form.skills.toggle(0); // computer skills
        form.interests.toggle(1);

        let profile = form.collect();
        assert_eq!(profile.skills, vec!["computer skills", "accounting"]);
        assert_eq!(profile.interests, vec!["marketing"]);
    }

    #[test]
    fn test_toggle_twice_unchecks() {
        let mut form = FormState::default();
        form.skills.toggle(1);
        form.skills.toggle(1);
        assert!(form.collect().skills.is_empty());
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let mut form = FormState::default();
        form.interests.toggle(99);
        assert!(form.collect().interests.is_empty());
    }

    #[test]
    fn test_select_cycles_through_placeholder() {
        let mut field = SelectField::new(EDUCATION);
        assert_eq!(field.value(), "");
        field.next();
        assert_eq!(field.value(), "10th");
        field.prev();
        assert_eq!(field.value(), "");
        field.prev();
        assert_eq!(field.value(), "Master's");
        field.next();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_select_label_follows_value() {
        let mut form = FormState::default();
        assert_eq!(form.location.label(), "-- select --");
        form.location.next();
        form.location.next();
        form.location.next();
        assert_eq!(form.collect().location, "bangalore");
        assert_eq!(form.location.label(), "Bangalore");
    }

    #[test]
    fn test_from_args_trims_and_drops_blanks() {
        let profile = from_args(
            Some(" Bachelor's "),
            &["communication".to_string(), "  ".to_string()],
            &["technology".to_string()],
            None,
        );
        assert_eq!(profile.education, "Bachelor's");
        assert_eq!(profile.skills, vec!["communication"]);
        assert_eq!(profile.location, "");
    }
}
