use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VerificationResult {
    pub filename: String,
    pub prediction_score: f32,
    pub is_real: bool,
    pub result: String,
}
