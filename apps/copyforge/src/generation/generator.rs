//! Content Generation — orchestrates a single copy or brand-kit generation.
//!
//! Flow: validate → (optional) image analysis → format_prompt → LLM complete →
//!       save to history → return the raw text (parsed, for brand kits).
//!
//! The history write happens after the model has answered, so a failed save is
//! logged and the generated text is still returned.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::brand_kit::{parse_brand_kit, BrandKitData};
use crate::generation::content_type::ContentType;
use crate::generation::image_analysis::{analyze_product_images, ImageAnalysis, ProductImage};
use crate::generation::prompts::format_prompt;
use crate::history::NewHistoryItem;
use crate::llm_client::prompts::COPYWRITER_SYSTEM;
use crate::llm_client::{CallOptions, ChatMessage, LlmClient};
use crate::state::AppState;

const TEXT_OPTIONS: CallOptions = CallOptions {
    temperature: 0.7,
    max_tokens: 1000,
    json_mode: false,
};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CopyRequest {
    pub product_name: String,
    pub product_description: String,
    pub content_type: ContentType,
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone)]
pub struct CopyOutcome {
    /// Model output, verbatim.
    pub content: String,
    /// Present when images were supplied and the analysis succeeded.
    pub analysis: Option<ImageAnalysis>,
}

#[derive(Debug, Clone)]
pub struct BrandKitRequest {
    pub product_name: String,
    pub product_description: String,
}

#[derive(Debug, Clone)]
pub struct BrandKitOutcome {
    pub raw: String,
    pub kit: BrandKitData,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates marketing copy and records it in history.
pub async fn generate_copy(
    state: &mut AppState,
    request: CopyRequest,
) -> Result<CopyOutcome, AppError> {
    validate_name(&request.product_name)?;
    // Images can stand in for a missing description.
    if request.images.is_empty() {
        validate_description(&request.product_description)?;
    }
    if !ContentType::COPY_TYPES.contains(&request.content_type) {
        return Err(AppError::Validation(
            "Use the brand kit generator for brand kits".to_string(),
        ));
    }

    let llm = state.llm()?;

    let analysis = if request.images.is_empty() {
        None
    } else {
        match analyze_product_images(&request.images, llm).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!("Image analysis failed, proceeding with the manual description: {e}");
                None
            }
        }
    };

    let description = match &analysis {
        Some(analysis) => format!(
            "{}{}",
            analysis.enhance_description(&request.product_description),
            analysis.prompt_appendix()
        ),
        None => {
            validate_description(&request.product_description)?;
            request.product_description.clone()
        }
    };

    info!(
        "Generating {} for '{}'",
        request.content_type.label(),
        request.product_name
    );
    let prompt = format_prompt(&request.product_name, &description, request.content_type);
    let content = complete_text(llm, prompt).await?;

    record_history(
        state,
        NewHistoryItem::new(&request.product_name, request.content_type, &content),
    );

    Ok(CopyOutcome { content, analysis })
}

/// Generates a brand kit, records the raw text in history, and parses it.
pub async fn generate_brand_kit(
    state: &mut AppState,
    request: BrandKitRequest,
) -> Result<BrandKitOutcome, AppError> {
    validate_name(&request.product_name)?;
    validate_description(&request.product_description)?;
    let llm = state.llm()?;

    info!("Generating brand kit for '{}'", request.product_name);
    let prompt = format_prompt(
        &request.product_name,
        &request.product_description,
        ContentType::BrandKit,
    );
    let raw = complete_text(llm, prompt).await?;

    record_history(
        state,
        NewHistoryItem::new(&request.product_name, ContentType::BrandKit, &raw),
    );

    let kit = parse_brand_kit(&raw);
    if kit.is_empty() {
        warn!("Brand kit reply had no recognizable sections");
    }

    Ok(BrandKitOutcome { raw, kit })
}

async fn complete_text(llm: &LlmClient, prompt: String) -> Result<String, AppError> {
    let messages = [
        ChatMessage::system(COPYWRITER_SYSTEM),
        ChatMessage::user(prompt),
    ];
    Ok(llm
        .complete(llm.text_model(), &messages, TEXT_OPTIONS)
        .await?)
}

fn record_history(state: &mut AppState, item: NewHistoryItem) {
    if let Err(e) = state.history.add(item) {
        warn!("Generated content was not saved to history: {e}");
    }
}

fn validate_name(product_name: &str) -> Result<(), AppError> {
    if product_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Product name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(product_description: &str) -> Result<(), AppError> {
    if product_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Product description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, body_string_contains, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::Config;
    use crate::history::{HistoryItem, HistoryStorage, HistoryStore, MemoryStorage};

    struct ReadOnlyStorage;

    impl HistoryStorage for ReadOnlyStorage {
        fn load(&self) -> Result<Option<Vec<HistoryItem>>, AppError> {
            Ok(None)
        }

        fn save(&self, _items: &[HistoryItem]) -> Result<(), AppError> {
            Err(AppError::Storage("read-only file system".to_string()))
        }
    }

    fn state_for(server: Option<&MockServer>, storage: &MemoryStorage) -> AppState {
        let config = Config::from_lookup(|_| None).unwrap();
        let llm = server.map(|s| {
            LlmClient::new(
                "sk-test".to_string(),
                s.uri(),
                "text-model".to_string(),
                "vision-model".to_string(),
                None,
            )
            .unwrap()
        });
        AppState {
            config,
            llm,
            history: HistoryStore::open(Box::new(storage.clone())),
        }
    }

    fn completion(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": text}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 20}
        }))
    }

    fn copy_request(content_type: ContentType) -> CopyRequest {
        CopyRequest {
            product_name: "Glow Lamp".to_string(),
            product_description: "A lamp that glows".to_string(),
            content_type,
            images: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_generate_copy_returns_text_and_saves_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "text-model", "max_tokens": 1000})))
            .and(body_string_contains("Glow Lamp"))
            .respond_with(completion("1. Light up your nights"))
            .expect(1)
            .mount(&server)
            .await;

        let storage = MemoryStorage::default();
        let mut state = state_for(Some(&server), &storage);

        let outcome = generate_copy(&mut state, copy_request(ContentType::FacebookAd))
            .await
            .unwrap();

        assert_eq!(outcome.content, "1. Light up your nights");
        assert!(outcome.analysis.is_none());
        let saved = storage.snapshot();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].product_name, "Glow Lamp");
        assert_eq!(saved[0].content_type, ContentType::FacebookAd);
        assert_eq!(saved[0].content, "1. Light up your nights");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_request() {
        let storage = MemoryStorage::default();
        let mut state = state_for(None, &storage);

        let result = generate_copy(&mut state, copy_request(ContentType::ColdEmail)).await;
        assert!(matches!(result, Err(AppError::Config(_))));
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_inputs_are_rejected() {
        let storage = MemoryStorage::default();
        let mut state = state_for(None, &storage);

        let mut request = copy_request(ContentType::FacebookAd);
        request.product_name = "  ".to_string();
        let result = generate_copy(&mut state, request).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = generate_brand_kit(
            &mut state,
            BrandKitRequest {
                product_name: "Glow".to_string(),
                product_description: String::new(),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_brand_kit_type_is_rejected_by_copy_generator() {
        let storage = MemoryStorage::default();
        let mut state = state_for(None, &storage);
        let result = generate_copy(&mut state, copy_request(ContentType::BrandKit)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_api_failure_is_not_saved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let storage = MemoryStorage::default();
        let mut state = state_for(Some(&server), &storage);

        let result = generate_copy(&mut state, copy_request(ContentType::LandingPage)).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_image_analysis_enriches_the_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "vision-model"})))
            .respond_with(completion(
                r#"{"enhancedDescription": "A brass desk lamp.", "keyFeatures": ["Dimmer"], "targetAudience": "Writers", "uniqueSellingPoints": ["Warm light"]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "text-model"})))
            .and(body_string_contains("A brass desk lamp. A lamp that glows"))
            .and(body_string_contains("Key Features: Dimmer"))
            .respond_with(completion("Caption"))
            .expect(1)
            .mount(&server)
            .await;

        let storage = MemoryStorage::default();
        let mut state = state_for(Some(&server), &storage);
        let mut request = copy_request(ContentType::InstagramCaption);
        request.images = vec![ProductImage::from_bytes("lamp.png", "image/png", b"png")];

        let outcome = generate_copy(&mut state, request).await.unwrap();
        assert_eq!(outcome.content, "Caption");
        assert_eq!(outcome.analysis.unwrap().target_audience, "Writers");
    }

    #[tokio::test]
    async fn test_failed_image_analysis_falls_back_to_manual_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "vision-model"})))
            .respond_with(completion("I cannot see any images."))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "text-model"})))
            .respond_with(completion("Headline"))
            .expect(1)
            .mount(&server)
            .await;

        let storage = MemoryStorage::default();
        let mut state = state_for(Some(&server), &storage);
        let mut request = copy_request(ContentType::FacebookAd);
        request.images = vec![ProductImage::from_bytes("lamp.png", "image/png", b"png")];

        let outcome = generate_copy(&mut state, request).await.unwrap();
        assert_eq!(outcome.content, "Headline");
        assert!(outcome.analysis.is_none());
    }

    #[tokio::test]
    async fn test_generate_brand_kit_parses_and_saves_raw_text() {
        let raw = "### 🎨 COLOR PALETTE\n- Primary: Ocean Blue: #1E3A8A\n### 🗣️ TAGLINE SUGGESTIONS\n- Glow on\n";
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("brand kit"))
            .respond_with(completion(raw))
            .expect(1)
            .mount(&server)
            .await;

        let storage = MemoryStorage::default();
        let mut state = state_for(Some(&server), &storage);

        let outcome = generate_brand_kit(
            &mut state,
            BrandKitRequest {
                product_name: "Glow".to_string(),
                product_description: "Lamps".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.raw, raw);
        assert_eq!(outcome.kit.colors[0].name, "Ocean Blue");
        assert_eq!(outcome.kit.taglines, vec!["Glow on"]);
        let saved = storage.snapshot();
        assert_eq!(saved[0].content_type, ContentType::BrandKit);
        assert_eq!(saved[0].content, raw);
    }

    #[tokio::test]
    async fn test_failed_history_save_still_returns_generated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion("1. Headline worth keeping"))
            .expect(2)
            .mount(&server)
            .await;

        let mut state = state_for(Some(&server), &MemoryStorage::default());
        state.history = HistoryStore::open(Box::new(ReadOnlyStorage));

        let outcome = generate_copy(&mut state, copy_request(ContentType::FacebookAd))
            .await
            .unwrap();
        assert_eq!(outcome.content, "1. Headline worth keeping");

        let kit = generate_brand_kit(
            &mut state,
            BrandKitRequest {
                product_name: "Glow".to_string(),
                product_description: "Lamps".to_string(),
            },
        )
        .await;
        assert!(kit.is_ok());
    }

    #[tokio::test]
    async fn test_images_can_stand_in_for_a_missing_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "vision-model"})))
            .respond_with(completion(
                r#"{"enhancedDescription": "A brass desk lamp.", "keyFeatures": ["Dimmer"]}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "text-model"})))
            .and(body_string_contains("A brass desk lamp.\\n\\nAI Visual Analysis"))
            .respond_with(completion("Headline"))
            .expect(1)
            .mount(&server)
            .await;

        let storage = MemoryStorage::default();
        let mut state = state_for(Some(&server), &storage);
        let mut request = copy_request(ContentType::FacebookAd);
        request.product_description = String::new();
        request.images = vec![ProductImage::from_bytes("lamp.png", "image/png", b"png")];

        let outcome = generate_copy(&mut state, request).await.unwrap();
        assert_eq!(outcome.content, "Headline");
    }

    #[tokio::test]
    async fn test_missing_description_fails_when_image_analysis_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "vision-model"})))
            .respond_with(completion("no json here"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "text-model"})))
            .respond_with(completion("Headline"))
            .expect(0)
            .mount(&server)
            .await;

        let storage = MemoryStorage::default();
        let mut state = state_for(Some(&server), &storage);
        let mut request = copy_request(ContentType::FacebookAd);
        request.product_description = "   ".to_string();
        request.images = vec![ProductImage::from_bytes("lamp.png", "image/png", b"png")];

        let result = generate_copy(&mut state, request).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(storage.save_count(), 0);
    }
}
