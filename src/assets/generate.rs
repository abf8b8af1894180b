use async_trait::async_trait;

use crate::assets::catalog::FrameCatalog;
use crate::assets::model::FrameAsset;
use crate::foundation::error::{LuminaError, LuminaResult};

/// Instructions handed to a text-to-markup model alongside the user's theme.
pub const FRAME_SYSTEM_PROMPT: &str = "\
You are an expert SVG artist. Create a decorative frame overlay for a photo app.
The frame should be transparent in the center so the user can see themselves.
The aspect ratio should be roughly 9:16 (vertical mobile screen).

Return ONLY the raw SVG string.
Ensure the SVG has width=\"100%\" height=\"100%\" and preserveAspectRatio=\"xMidYMid slice\".
Use a viewBox of \"0 0 1080 1920\".
The content should be stylish, modern, or themed based on the user prompt.
Do not include markdown code blocks.";

/// Build the user prompt for a frame theme.
pub fn frame_prompt(theme: &str) -> String {
    format!(
        "Create a frame with this theme: {}. Make sure the center is empty/transparent.",
        theme.trim()
    )
}

/// External service turning a theme description into raw vector markup.
#[async_trait]
pub trait FrameGenerator: Send + Sync {
    /// Return the model's raw text response for `theme`.
    async fn generate_markup(&self, theme: &str) -> LuminaResult<String>;
}

/// Clean up a generated response and wrap it as a new vector frame named after `theme`.
///
/// Markdown code fences are stripped; a response without an `<svg` element is rejected.
pub fn frame_from_markup(theme: &str, raw: &str) -> LuminaResult<FrameAsset> {
    let markup = raw
        .replace("```xml", "")
        .replace("```svg", "")
        .replace("```", "");
    let markup = markup.trim();
    if !markup.contains("<svg") {
        return Err(LuminaError::generation("failed to generate valid SVG"));
    }
    Ok(FrameAsset::vector(
        uuid::Uuid::new_v4().to_string(),
        theme.trim(),
        markup,
    ))
}

/// Ask `generator` for a themed frame and append it to `catalog`.
///
/// On any failure the catalog is left untouched.
#[tracing::instrument(level = "info", skip(generator, catalog))]
pub async fn generate_frame<'c>(
    generator: &dyn FrameGenerator,
    catalog: &'c mut FrameCatalog,
    theme: &str,
) -> LuminaResult<&'c FrameAsset> {
    if theme.trim().is_empty() {
        return Err(LuminaError::validation("frame theme must be non-empty"));
    }
    let raw = generator.generate_markup(theme).await.map_err(|e| {
        tracing::error!(error = %e, "frame generation failed");
        match e {
            LuminaError::Generation(_) => e,
            other => LuminaError::generation(other.to_string()),
        }
    })?;
    let asset = frame_from_markup(theme, &raw)?;
    tracing::info!(frame = %asset.id(), "generated frame appended");
    catalog.append(asset)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/generate.rs"]
mod tests;
