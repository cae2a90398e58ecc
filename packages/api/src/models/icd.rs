use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IcdSuggestRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_threshold: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IcdSuggestion {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, rename = "needsReview")]
    pub needs_review: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IcdSuggestions {
    #[serde(default)]
    pub codes: Vec<IcdSuggestion>,
}
