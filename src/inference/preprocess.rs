use std::path::Path;

use image::ImageReader;
use image::imageops::FilterType;
use tch::Tensor;

use crate::error::ProcessingError;

pub const IMG_WIDTH: u32 = 224;
pub const IMG_HEIGHT: u32 = 224;

/// Decodes the image at `path` and produces the model input: a
/// `[1, 224, 224, 3]` float tensor with channel values scaled to [0, 1].
/// The resize is exact; aspect-ratio distortion is accepted.
pub fn image_to_tensor(path: &Path) -> Result<Tensor, ProcessingError> {
    let decoded = ImageReader::open(path)
        .map_err(|e| ProcessingError::DecodeFailure(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| ProcessingError::DecodeFailure(e.to_string()))?
        .decode()
        .map_err(|e| ProcessingError::DecodeFailure(e.to_string()))?;

    let rgb = decoded
        .resize_exact(IMG_WIDTH, IMG_HEIGHT, FilterType::Triangle)
        .to_rgb8();

    let pixels: Vec<f32> = rgb.into_raw().iter().map(|&p| p as f32 / 255.0).collect();
    Ok(Tensor::from_slice(&pixels).view([1, IMG_HEIGHT as i64, IMG_WIDTH as i64, 3]))
}
