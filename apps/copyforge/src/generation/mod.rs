// Content generation: prompt formatting, image analysis, the brand kit parser,
// and the copy / brand-kit pipelines. All LLM calls go through llm_client.

pub mod brand_kit;
pub mod content_type;
pub mod generator;
pub mod handlers;
pub mod image_analysis;
pub mod prompts;
