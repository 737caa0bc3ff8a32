//! Decoding of base64 image payloads into model input tensors.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::imageops::FilterType;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}

impl From<PreprocessError> for AppError {
    fn from(err: PreprocessError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

/// Square RGB image as `f32` pixel values in `0.0..=255.0`, laid out
/// row-major as `[height][width][channel]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    size: u32,
    data: Vec<f32>,
}

impl ImageTensor {
    pub fn zeros(size: u32) -> Self {
        let len = (size as usize) * (size as usize) * 3;
        Self {
            size,
            data: vec![0.0; len],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

/// Decode a base64 image, optionally given as a data URL, into a
/// `size x size` RGB tensor.
pub fn decode_image(payload: &str, size: u32) -> Result<ImageTensor, PreprocessError> {
    let encoded = match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    };

    let bytes = STANDARD.decode(encoded.trim())?;
    let img = image::load_from_memory(&bytes)?;
    let resized = image::imageops::resize(&img.to_rgb8(), size, size, FilterType::CatmullRom);

    let data = resized
        .pixels()
        .flat_map(|p| p.0.iter().map(|&c| c as f32))
        .collect();

    Ok(ImageTensor { size, data })
}
