use api::models::{AnalyzeResponse, Differential, SuggestedTest};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisView {
    pub differentials: Vec<String>,
    pub tests: Vec<String>,
    pub notes: Option<String>,
}

pub fn differential_line(d: &Differential) -> String {
    let probability = d
        .probability
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| format!(" ({p})"))
        .unwrap_or_default();
    if d.rationale.is_empty() {
        format!("{}{}", d.condition, probability)
    } else {
        format!("{}{}: {}", d.condition, probability, d.rationale)
    }
}

pub fn test_line(t: &SuggestedTest) -> String {
    match t.rationale.as_deref().filter(|r| !r.is_empty()) {
        Some(rationale) => format!("{}: {}", t.name, rationale),
        None => t.name.clone(),
    }
}

pub fn analysis_view(response: &AnalyzeResponse) -> AnalysisView {
    AnalysisView {
        differentials: response.differentials.iter().map(differential_line).collect(),
        tests: response.tests.iter().map(test_line).collect(),
        notes: response.notes.clone().filter(|n| !n.trim().is_empty()),
    }
}
