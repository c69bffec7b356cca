use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use thinkwell::session::service::MentalModelRequest;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MentalModelParams {
    #[schemars(description = "Session identifier")]
    pub session_id: String,

    #[schemars(
        description = "Key of the mental model to apply (e.g. 'first_principles', 'opportunity_cost', 'bayesian_thinking', 'systems_thinking'). Use list_mental_models for the full list."
    )]
    pub model_name: String,

    #[schemars(description = "Problem statement to analyze")]
    pub problem: String,

    #[schemars(description = "Steps to follow. Defaults to the model's own steps.")]
    pub steps: Option<Vec<String>>,

    #[schemars(description = "Reasoning produced while applying the model")]
    pub reasoning: Option<String>,

    #[schemars(description = "Conclusion reached")]
    pub conclusion: Option<String>,

    #[schemars(description = "Confidence in the conclusion, 0.0-1.0")]
    pub confidence: Option<f64>,
}

impl From<MentalModelParams> for MentalModelRequest {
    fn from(p: MentalModelParams) -> Self {
        Self {
            session_id: p.session_id,
            model_name: p.model_name,
            problem: p.problem,
            steps: p.steps,
            reasoning: p.reasoning,
            conclusion: p.conclusion,
            confidence: p.confidence,
        }
    }
}
