//! Talks to the image-generation service and turns locators into pixels.
//!
//! Generation failures are errors the caller must surface; loading failures
//! are not. `load_image` always hands back an image, substituting a fixed
//! placeholder when the locator is unreachable or the bytes do not decode,
//! so the board layer never sees an absent image.

use std::fs;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edge length of the placeholder substituted on load failure.
pub const FALLBACK_SIZE: u32 = 100;

const FALLBACK_FILL: Rgba<u8> = Rgba([211, 211, 211, 255]);
const FALLBACK_MARK: Rgba<u8> = Rgba([220, 30, 30, 255]);

const IMAGE_MODEL: &str = "dall-e-3";
const IMAGE_COUNT: u32 = 1;
const IMAGE_SIZE: &str = "1024x1024";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0} is not set")]
    MissingConfig(&'static str),
    #[error("image service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("image service response carried no image url")]
    MissingUrl,
    #[error("could not read {0}")]
    Read(#[from] std::io::Error),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    url: String,
}

/// Asks the image service to render the prompt and returns the locator of
/// the generated image. One blocking call, no retry; any failure is
/// terminal to the current puzzle setup.
pub fn generate_image_url(
    api_url: &str,
    api_key: &str,
    prompt: &str,
) -> Result<String, PipelineError> {
    if api_url.trim().is_empty() {
        return Err(PipelineError::MissingConfig("OPENAI_API_URL"));
    }
    if api_key.trim().is_empty() {
        return Err(PipelineError::MissingConfig("OPENAI_API_KEY"));
    }
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let request = GenerateRequest {
        model: IMAGE_MODEL,
        prompt,
        n: IMAGE_COUNT,
        size: IMAGE_SIZE,
    };
    info!("requesting a {IMAGE_SIZE} image from {api_url}");
    let response: GenerateResponse = client
        .post(api_url)
        .bearer_auth(api_key)
        .json(&request)
        .send()?
        .error_for_status()?
        .json()?;
    response
        .data
        .into_iter()
        .next()
        .map(|entry| entry.url)
        .ok_or(PipelineError::MissingUrl)
}

/// Loads and decodes the image behind an `http(s)` URL or a local path.
/// Never fails: any fetch or decode problem is logged and replaced by the
/// fallback placeholder, which the board handles like any other image.
pub fn load_image(locator: &str) -> RgbaImage {
    match fetch_and_decode(locator) {
        Ok(image) => image,
        Err(err) => {
            warn!("substituting placeholder for {locator}: {err}");
            fallback_image()
        }
    }
}

fn fetch_and_decode(locator: &str) -> Result<RgbaImage, PipelineError> {
    let bytes = if locator.starts_with("http://") || locator.starts_with("https://") {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        client
            .get(locator)
            .send()?
            .error_for_status()?
            .bytes()?
            .to_vec()
    } else {
        fs::read(locator)?
    };
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Fixed 100x100 placeholder: neutral gray with a red cross so a failed
/// load is visible at a glance.
pub fn fallback_image() -> RgbaImage {
    let mut image = RgbaImage::from_pixel(FALLBACK_SIZE, FALLBACK_SIZE, FALLBACK_FILL);
    for i in 0..FALLBACK_SIZE {
        let mirrored = FALLBACK_SIZE - 1 - i;
        for offset in 0..2 {
            let x = (i + offset).min(FALLBACK_SIZE - 1);
            image.put_pixel(x, i, FALLBACK_MARK);
            image.put_pixel(x, mirrored, FALLBACK_MARK);
        }
    }
    image
}
