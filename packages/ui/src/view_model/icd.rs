//! ICD-10 suggestions and the page-local list of accepted codes.

use api::models::IcdSuggestion;

#[derive(Clone, Debug, PartialEq)]
pub struct IcdRow {
    pub code: String,
    pub label: String,
    pub confidence: Option<String>,
    pub needs_review: bool,
    pub accepted: bool,
}

pub fn icd_rows(suggestions: &[IcdSuggestion], accepted: &AcceptedCodes) -> Vec<IcdRow> {
    suggestions
        .iter()
        .map(|s| IcdRow {
            code: s.code.clone(),
            label: s.label.clone(),
            confidence: s
                .confidence
                .map(|c| format!("{:.0}%", (c * 100.0).clamp(0.0, 100.0))),
            needs_review: s.needs_review,
            accepted: accepted.contains(&s.code),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptedCode {
    pub code: String,
    pub label: String,
}

/// Outcome of [`AcceptedCodes::accept`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcceptOutcome {
    Added,
    AlreadyAccepted,
}

impl AcceptOutcome {
    pub fn message(&self, code: &str) -> String {
        match self {
            AcceptOutcome::Added => format!("{code} added to the accepted codes"),
            AcceptOutcome::AlreadyAccepted => format!("{code} is already accepted"),
        }
    }
}

/// Codes the doctor accepted during this page visit. Never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AcceptedCodes {
    codes: Vec<AcceptedCode>,
}

impl AcceptedCodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn codes(&self) -> &[AcceptedCode] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Accept a code. A code already in the list is left untouched.
    pub fn accept(&mut self, code: &str, label: &str) -> AcceptOutcome {
        if self.contains(code) {
            return AcceptOutcome::AlreadyAccepted;
        }
        self.codes.push(AcceptedCode {
            code: code.to_string(),
            label: label.to_string(),
        });
        AcceptOutcome::Added
    }

    pub fn remove(&mut self, code: &str) {
        self.codes.retain(|c| !c.code.eq_ignore_ascii_case(code));
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_accept_is_noop() {
        let mut accepted = AcceptedCodes::new();
        assert_eq!(accepted.accept("I20.9", "Angina de pecho"), AcceptOutcome::Added);
        assert_eq!(
            accepted.accept("I20.9", "Angina de pecho"),
            AcceptOutcome::AlreadyAccepted
        );
        assert_eq!(accepted.len(), 1);
        assert_eq!(
            AcceptOutcome::AlreadyAccepted.message("I20.9"),
            "I20.9 is already accepted"
        );
    }

    #[test]
    fn test_remove_then_accept_again() {
        let mut accepted = AcceptedCodes::new();
        accepted.accept("E11", "Diabetes tipo 2");
        accepted.remove("e11");
        assert!(accepted.is_empty());
        assert_eq!(accepted.accept("E11", "Diabetes tipo 2"), AcceptOutcome::Added);
    }

    #[test]
    fn test_rows_mark_accepted() {
        let suggestions: Vec<IcdSuggestion> = serde_json::from_str(
            r#"[{"code":"I20.9","label":"Angina","confidence":0.874,"needsReview":false},
                {"code":"R07.4","label":"Dolor torácico","needsReview":true}]"#,
        )
        .unwrap();
        let mut accepted = AcceptedCodes::new();
        accepted.accept("I20.9", "Angina");

        let rows = icd_rows(&suggestions, &accepted);
        assert_eq!(rows[0].confidence.as_deref(), Some("87%"));
        assert!(rows[0].accepted);
        assert_eq!(rows[1].confidence, None);
        assert!(rows[1].needs_review);
        assert!(!rows[1].accepted);
    }
}
