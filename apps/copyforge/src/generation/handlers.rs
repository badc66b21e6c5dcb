//! Command handlers. Each returns the text to print on stdout; logs go to stderr.

use std::path::PathBuf;

use tracing::info;

use crate::cli::{AnalyzeArgs, BrandKitArgs, CopyArgs, HistoryCommand};
use crate::errors::AppError;
use crate::export::{copy_best_effort, copy_to_clipboard, export_pdf};
use crate::generation::brand_kit::parse_brand_kit;
use crate::generation::content_type::{ContentType, PageType};
use crate::generation::generator::{generate_brand_kit, generate_copy, BrandKitRequest, CopyRequest};
use crate::generation::image_analysis::{analyze_product_images, load_images, ImageAnalysis};
use crate::history::HistoryItem;
use crate::render::history::{render_history_list, render_item_header};
use crate::render::{clipboard_text, preview_for, render_brand_kit, render_markdown};
use crate::state::AppState;

/// `copyforge copy`
pub async fn handle_copy(state: &mut AppState, args: CopyArgs) -> Result<String, AppError> {
    let images = load_images(&args.images).await?;

    let request = CopyRequest {
        product_name: args.product.name.clone(),
        product_description: args.product.description,
        content_type: args.content_type,
        images,
    };
    let outcome = generate_copy(state, request).await?;

    if args.copy && copy_best_effort(outcome.content.clone()).await {
        info!("Copied to clipboard");
    }

    let mut sections = Vec::new();
    if let Some(analysis) = &outcome.analysis {
        sections.push(render_analysis(analysis));
    }
    sections.push(render_markdown(&outcome.content));
    if !args.no_preview {
        if let Some(preview) = preview_for(args.content_type, &args.product.name, &outcome.content)
        {
            sections.push(preview.to_string());
        }
    }

    Ok(sections.join("\n\n"))
}

/// `copyforge brand-kit`
pub async fn handle_brand_kit(
    state: &mut AppState,
    args: BrandKitArgs,
) -> Result<String, AppError> {
    let request = BrandKitRequest {
        product_name: args.product.name,
        product_description: args.product.description,
    };
    let outcome = generate_brand_kit(state, request).await?;

    if args.copy && copy_best_effort(clipboard_text(ContentType::BrandKit, &outcome.raw)).await {
        info!("Copied to clipboard");
    }

    if args.raw || outcome.kit.is_empty() {
        Ok(outcome.raw)
    } else {
        Ok(render_brand_kit(&outcome.kit))
    }
}

/// `copyforge analyze`
pub async fn handle_analyze(state: &AppState, args: AnalyzeArgs) -> Result<String, AppError> {
    let llm = state.llm()?;
    let images = load_images(&args.images).await?;
    let analysis = analyze_product_images(&images, llm).await?;
    Ok(render_analysis(&analysis))
}

/// `copyforge history ...`
pub async fn handle_history(
    state: &mut AppState,
    command: HistoryCommand,
) -> Result<String, AppError> {
    match command {
        HistoryCommand::List => Ok(render_history_list(state.history.items())),
        HistoryCommand::Show { id } => {
            let item = find_item(state, &id)?;
            Ok(format!(
                "{}\n\n{}",
                render_item_header(item),
                render_item_content(item)
            ))
        }
        HistoryCommand::Delete { id } => {
            if state.history.delete(&id)? {
                Ok(format!("Deleted {id}"))
            } else {
                Ok(format!("Nothing to delete: no saved item with id {id}"))
            }
        }
        HistoryCommand::Copy { id } => {
            let item = find_item(state, &id)?;
            copy_to_clipboard(clipboard_text(item.content_type, &item.content)).await?;
            Ok(format!("Copied '{}' to clipboard", item.product_name))
        }
        HistoryCommand::Export { id, out } => {
            let item = find_item(state, &id)?;
            let dir: PathBuf = out.unwrap_or_else(|| state.config.export_dir.clone());
            let path = export_pdf(item, &dir).await?;
            Ok(format!("Exported to {}", path.display()))
        }
    }
}

fn find_item<'a>(state: &'a AppState, id: &str) -> Result<&'a HistoryItem, AppError> {
    state
        .history
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("No saved item with id {id}")))
}

fn render_item_content(item: &HistoryItem) -> String {
    if item.page_type == PageType::BrandKit {
        let kit = parse_brand_kit(&item.content);
        if !kit.is_empty() {
            return render_brand_kit(&kit);
        }
    }
    render_markdown(&item.content)
}

fn render_analysis(analysis: &ImageAnalysis) -> String {
    format!(
        "AI VISUAL ANALYSIS\n  Description: {}\n  Key Features: {}\n  Target Audience: {}\n  Unique Selling Points: {}",
        analysis.enhanced_description,
        analysis.key_features.join(", "),
        analysis.target_audience,
        analysis.unique_selling_points.join(", ")
    )
}
