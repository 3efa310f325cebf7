use std::sync::Mutex;

use tch::{CModule, Device, Tensor};

use crate::error::ProcessingError;

/// Scores one preprocessed image. Implementations take a `[1, 224, 224, 3]`
/// float tensor and return a spoof probability in [0, 1].
pub trait Classifier: Send + Sync {
    fn predict(&self, input: &Tensor) -> Result<f32, ProcessingError>;
}

/// TorchScript-backed liveness classifier, loaded once at startup and shared
/// read-only for the process lifetime.
pub struct TorchClassifier {
    // CModule is Send but not Sync, so forwarding goes through a lock.
    model: Mutex<CModule>,
}

impl TorchClassifier {
    pub fn load(model_path: &str) -> Result<Self, ProcessingError> {
        let device = Device::cuda_if_available();
        let model = CModule::load_on_device(model_path, device)
            .map_err(|e| ProcessingError::InferenceFailure(e.to_string()))?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Classifier for TorchClassifier {
    fn predict(&self, input: &Tensor) -> Result<f32, ProcessingError> {
        let output = self
            .model
            .lock()
            .unwrap()
            .forward_ts(&[input])
            .map_err(|e| ProcessingError::InferenceFailure(e.to_string()))?;
        let score = output
            .f_double_value(&[0, 0])
            .map_err(|e| ProcessingError::InferenceFailure(e.to_string()))?;
        Ok(score as f32)
    }
}

/// Fixed-score stand-in for handler and service tests.
#[cfg(test)]
pub(crate) struct StubClassifier(pub f32);

#[cfg(test)]
impl Classifier for StubClassifier {
    fn predict(&self, _input: &Tensor) -> Result<f32, ProcessingError> {
        Ok(self.0)
    }
}

/// Always-failing stand-in for exercising the inference error path.
#[cfg(test)]
pub(crate) struct FailingClassifier;

#[cfg(test)]
impl Classifier for FailingClassifier {
    fn predict(&self, _input: &Tensor) -> Result<f32, ProcessingError> {
        Err(ProcessingError::InferenceFailure("stub failure".into()))
    }
}
