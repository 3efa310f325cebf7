use std::env;
use std::path::PathBuf;

/// Runtime settings, read from the environment (with `.env` support loaded in
/// `main`). Every knob has a default so a bare checkout runs.
pub struct Settings {
    pub port: u16,
    pub model_path: String,
    pub temp_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8081);
        let model_path =
            env::var("MODEL_PATH").unwrap_or_else(|_| "models/face_antispoofing.pt".to_string());
        let temp_dir = PathBuf::from(env::var("TEMP_DIR").unwrap_or_else(|_| "temp".to_string()));
        Self {
            port,
            model_path,
            temp_dir,
        }
    }
}
