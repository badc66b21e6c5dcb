//! Image Analysis — sends product images to a vision model and decodes a fixed
//! four-field marketing analysis.
//!
//! The request asks for JSON-only output. A reply that is not JSON at all is an
//! error; anything that parses is accepted, and each field that is missing, blank
//! or of the wrong type is replaced by its fallback value.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::generation::prompts::IMAGE_ANALYSIS_INSTRUCTION;
use crate::llm_client::prompts::PRODUCT_ANALYST_SYSTEM;
use crate::llm_client::{CallOptions, ChatMessage, ContentPart, ImageUrl, LlmClient, LlmError};

/// Upper bound on images sent per analysis.
pub const MAX_IMAGES: usize = 4;

const VISION_OPTIONS: CallOptions = CallOptions {
    temperature: 0.5,
    max_tokens: 1024,
    json_mode: true,
};

pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const NOT_SPECIFIED: &str = "Not specified";

/// Marketing analysis of a set of product images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub enhanced_description: String,
    pub key_features: Vec<String>,
    pub target_audience: String,
    pub unique_selling_points: Vec<String>,
}

impl Default for ImageAnalysis {
    fn default() -> Self {
        Self {
            enhanced_description: DEFAULT_DESCRIPTION.to_string(),
            key_features: vec![NOT_SPECIFIED.to_string()],
            target_audience: NOT_SPECIFIED.to_string(),
            unique_selling_points: vec![NOT_SPECIFIED.to_string()],
        }
    }
}

impl ImageAnalysis {
    /// Builds an analysis from any parsed JSON value, substituting per-field fallbacks.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();

        Self {
            enhanced_description: string_field(value, "enhancedDescription")
                .unwrap_or(defaults.enhanced_description),
            key_features: string_list_field(value, "keyFeatures").unwrap_or(defaults.key_features),
            target_audience: string_field(value, "targetAudience")
                .unwrap_or(defaults.target_audience),
            unique_selling_points: string_list_field(value, "uniqueSellingPoints")
                .unwrap_or(defaults.unique_selling_points),
        }
    }

    /// Decodes a raw model reply. Fails only when the reply is not JSON.
    pub fn from_reply(reply: &str) -> Result<Self, LlmError> {
        let value: Value = serde_json::from_str(crate::llm_client::strip_json_fences(reply))?;
        Ok(Self::from_value(&value))
    }

    /// Folds the analysis into a user description: the model's description leads,
    /// followed by whatever the user wrote.
    pub fn enhance_description(&self, user_description: &str) -> String {
        let user_description = user_description.trim();
        if user_description.is_empty() {
            self.enhanced_description.clone()
        } else {
            format!("{} {}", self.enhanced_description, user_description)
        }
    }

    /// The block appended to the description sent in the generation prompt.
    pub fn prompt_appendix(&self) -> String {
        format!(
            "\n\nAI Visual Analysis:\n- Key Features: {}\n- Target Audience: {}\n- Unique Selling Points: {}",
            self.key_features.join(", "),
            self.target_audience,
            self.unique_selling_points.join(", ")
        )
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list_field(value: &Value, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

// ────────────────────────────────────────────────────────────────────────────
// Product images
// ────────────────────────────────────────────────────────────────────────────

/// A local image encoded as a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub file_name: String,
    pub mime_type: String,
    pub data_url: String,
}

impl ProductImage {
    pub fn from_bytes(file_name: &str, mime_type: &str, bytes: &[u8]) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            data_url: format!("data:{mime_type};base64,{payload}"),
        }
    }
}

/// Returns the image MIME type guessed from the file extension, or a validation
/// error for anything that is not `image/*`.
pub fn image_mime_type(path: &Path) -> Result<&'static str, AppError> {
    match mime_guess::from_path(path).first_raw() {
        Some(mime) if mime.starts_with("image/") => Ok(mime),
        _ => Err(AppError::Validation(format!(
            "{} is not an image file",
            path.display()
        ))),
    }
}

/// Reads up to [`MAX_IMAGES`] image files and encodes them as data URLs.
/// Paths beyond the cap are skipped with a warning.
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<ProductImage>, AppError> {
    if paths.len() > MAX_IMAGES {
        warn!(
            "{} images supplied, only the first {} will be used",
            paths.len(),
            MAX_IMAGES
        );
    }

    let mut images = Vec::with_capacity(paths.len().min(MAX_IMAGES));
    for path in paths.iter().take(MAX_IMAGES) {
        let path = path.as_ref();
        let mime_type = image_mime_type(path)?;
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::Validation(format!("Could not read image {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        images.push(ProductImage::from_bytes(&file_name, mime_type, &bytes));
    }

    Ok(images)
}

// ────────────────────────────────────────────────────────────────────────────
// Vision call
// ────────────────────────────────────────────────────────────────────────────

/// Builds the user message: the instruction followed by one part per image.
pub fn build_analysis_message(images: &[ProductImage]) -> ChatMessage {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(ContentPart::Text {
        text: IMAGE_ANALYSIS_INSTRUCTION.to_string(),
    });
    parts.extend(images.iter().map(|image| ContentPart::ImageUrl {
        image_url: ImageUrl {
            url: image.data_url.clone(),
        },
    }));
    ChatMessage::user_parts(parts)
}

/// Analyzes product images with the vision model.
pub async fn analyze_product_images(
    images: &[ProductImage],
    llm: &LlmClient,
) -> Result<ImageAnalysis, AppError> {
    if images.is_empty() {
        return Err(AppError::Validation(
            "At least one product image is required for analysis".to_string(),
        ));
    }

    info!("Analyzing {} product image(s)", images.len());
    for image in images {
        debug!(file = %image.file_name, mime = %image.mime_type, "Attaching image");
    }

    let messages = [
        ChatMessage::system(PRODUCT_ANALYST_SYSTEM),
        build_analysis_message(images),
    ];

    let reply = llm
        .complete(llm.vision_model(), &messages, VISION_OPTIONS)
        .await?;

    Ok(ImageAnalysis::from_reply(&reply)?)
}
