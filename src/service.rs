use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ProcessingError;
use crate::inference::model::Classifier;
use crate::inference::preprocess;
use crate::models::VerificationResult;
use crate::scratch::ScratchFile;

/// Scores at or below the threshold classify as a real face.
pub const THRESHOLD: f32 = 0.5;

/// One verification per call: scratch write, decode, inference, verdict.
/// Constructed once in `main` and shared across requests; the classifier is
/// injected so tests can substitute a stub.
#[derive(Clone)]
pub struct VerifyService {
    classifier: Arc<dyn Classifier>,
    temp_dir: PathBuf,
}

impl VerifyService {
    pub fn new(classifier: Arc<dyn Classifier>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            classifier,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn verify(&self, bytes: &[u8], filename: &str) -> Result<VerificationResult, ProcessingError> {
        let scratch = ScratchFile::write(&self.temp_dir, filename, bytes)?;
        let tensor = preprocess::image_to_tensor(scratch.path())?;
        let score = self.classifier.predict(&tensor)?;

        let is_real = score <= THRESHOLD;
        let result = if is_real { "Verified" } else { "Not Verified" };

        Ok(VerificationResult {
            filename: filename.to_string(),
            prediction_score: score,
            is_real,
            result: result.to_string(),
        })
    }
}
