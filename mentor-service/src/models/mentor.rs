use serde::{Deserialize, Serialize};

/// Profile submitted on behalf of a user exploring career directions.
/// Lifetime is a single request; nothing is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct CareerMentorRequest {
    pub age: i32,
    pub interests: Vec<String>,
    #[serde(default)]
    pub strengths_summary: Option<String>,
    #[serde(default)]
    pub values_summary: Option<String>,
    /// Cultural/regional context the mentor should assume.
    #[serde(default = "default_context")]
    pub context: String,
}

fn default_context() -> String {
    "India".to_string()
}

/// Shape the prompt instructs the model to produce.
///
/// The live endpoint returns the model's JSON verbatim without checking it
/// against this shape; the struct documents the contract for consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerMentorResponse {
    /// Exactly 3 questions, per the prompt's instructions.
    pub diagnostic_questions: Vec<String>,
    /// 2-3 clusters, per the prompt's instructions.
    pub career_clusters: Vec<CareerCluster>,
    /// Exactly 3 steps, per the prompt's instructions.
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerCluster {
    pub name: String,
    pub why_it_fits: String,
}
