//! Career mentor engine: prompt construction, model invocation, strict JSON
//! parsing of the model's reply.

use crate::error::AppError;
use crate::models::CareerMentorRequest;
use crate::services::metrics;
use crate::services::providers::{GenerationParams, TextProvider};
use std::sync::Arc;
use std::time::Instant;

/// Fixed sampling temperature for mentor generations.
const TEMPERATURE: f32 = 0.4;

/// Fixed output-token cap for mentor generations.
const MAX_OUTPUT_TOKENS: i32 = 600;

/// Rendered in the prompt when an optional summary is absent.
const NOT_PROVIDED: &str = "Not provided";

pub struct MentorEngine {
    provider: Arc<dyn TextProvider>,
    model: String,
}

impl MentorEngine {
    pub fn new(provider: Arc<dyn TextProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Run the career mentor flow for one request.
    ///
    /// Returns the model's reply parsed as JSON. The reply is not validated
    /// against [`crate::models::CareerMentorResponse`]; the prompt's
    /// instructions are trusted, so downstream consumers may receive any
    /// JSON shape the model chose to emit.
    pub async fn run(&self, request: &CareerMentorRequest) -> Result<serde_json::Value, AppError> {
        let prompt = build_prompt(request);

        let params = GenerationParams {
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_OUTPUT_TOKENS),
            ..Default::default()
        };

        let started = Instant::now();
        let response = match self.provider.generate(&prompt, &params).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_provider_error(e.label());
                metrics::record_mentor_request("provider_error");
                return Err(e.into());
            }
        };
        metrics::record_provider_latency(&self.model, started.elapsed().as_secs_f64());
        metrics::record_tokens(&self.model, response.input_tokens, response.output_tokens);

        let text = match response.text {
            Some(text) => text,
            None => {
                metrics::record_mentor_request("provider_error");
                return Err(anyhow::anyhow!("provider returned an empty response").into());
            }
        };

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => {
                metrics::record_mentor_request("ok");
                Ok(value)
            }
            Err(e) => {
                // The raw text stays out of the error payload; log it for triage
                tracing::debug!(
                    error = %e,
                    raw_len = text.len(),
                    "Model output failed strict JSON parsing"
                );
                metrics::record_mentor_request("invalid_json");
                Err(AppError::InvalidModelOutput)
            }
        }
    }
}

/// Build the mentor prompt for one user profile.
///
/// Deterministic string interpolation; missing optional summaries render as
/// the literal text "Not provided".
pub fn build_prompt(request: &CareerMentorRequest) -> String {
    let interests = request.interests.join(", ");
    let strengths = request
        .strengths_summary
        .as_deref()
        .unwrap_or(NOT_PROVIDED);
    let values = request.values_summary.as_deref().unwrap_or(NOT_PROVIDED);

    format!(
        r#"You are an expert AI Career Mentor working with youth in {context}.

Your role:
- Help users explore possibilities, not make final decisions.
- Be encouraging, realistic, and culturally sensitive.
- Avoid labels, judgments, or claims of certainty.

User profile:
- Age: {age}
- Interests: {interests}
- Strengths summary: {strengths}
- Values / purpose summary: {values}

Your tasks:
1. Ask exactly 3 thoughtful diagnostic questions to deepen understanding.
2. Identify 2-3 possible career direction clusters that could fit the user.
3. Suggest practical next learning or exploration steps.

Rules:
- Do NOT say "this career is best for you".
- Do NOT rank the user against others.
- Use exploratory language ("may suit", "could align", "worth exploring").
- Assume diverse socioeconomic backgrounds.

Respond ONLY in valid JSON using this exact structure:

{{
  "diagnostic_questions": [
    "string",
    "string",
    "string"
  ],
  "career_clusters": [
    {{
      "name": "string",
      "why_it_fits": "string"
    }}
  ],
  "next_steps": [
    "string",
    "string",
    "string"
  ]
}}"#,
        context = request.context,
        age = request.age,
        interests = interests,
        strengths = strengths,
        values = values,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        strengths_summary: Option<&str>,
        values_summary: Option<&str>,
    ) -> CareerMentorRequest {
        CareerMentorRequest {
            age: 17,
            interests: vec!["robotics".to_string(), "music".to_string()],
            strengths_summary: strengths_summary.map(String::from),
            values_summary: values_summary.map(String::from),
            context: "India".to_string(),
        }
    }

    #[test]
    fn prompt_contains_profile_fields_verbatim() {
        let prompt = build_prompt(&request(
            Some("curious and persistent"),
            Some("wants to help others"),
        ));

        assert!(prompt.contains("Age: 17"));
        assert!(prompt.contains("Interests: robotics, music"));
        assert!(prompt.contains("Strengths summary: curious and persistent"));
        assert!(prompt.contains("Values / purpose summary: wants to help others"));
        assert!(prompt.contains("youth in India"));
    }

    #[test]
    fn missing_summaries_render_as_not_provided() {
        let prompt = build_prompt(&request(None, None));

        assert!(prompt.contains("Strengths summary: Not provided"));
        assert!(prompt.contains("Values / purpose summary: Not provided"));
    }

    #[test]
    fn prompt_instructs_strict_json_structure() {
        let prompt = build_prompt(&request(None, None));

        assert!(prompt.contains("Respond ONLY in valid JSON"));
        assert!(prompt.contains("\"diagnostic_questions\""));
        assert!(prompt.contains("\"career_clusters\""));
        assert!(prompt.contains("\"next_steps\""));
    }

    #[test]
    fn prompt_is_deterministic() {
        let req = request(Some("a"), None);
        assert_eq!(build_prompt(&req), build_prompt(&req));
    }
}
