//! Subcommand handlers.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use smartcrop_media::SmartCropper;
use smartcrop_ml_client::{MlClient, MlDetector, MlScorer};
use smartcrop_models::{CropRequest, MediaInfo};

use crate::args::{CropArgs, InfoArgs};
use crate::config::CliConfig;

/// Build a cropper wired to FFmpeg and the HTTP services.
pub fn build_cropper(config: &CliConfig) -> Result<SmartCropper> {
    let client = Arc::new(
        MlClient::new(config.services.clone()).context("Failed to create service client")?,
    );

    Ok(SmartCropper::with_defaults(
        &config.engine,
        Arc::new(MlDetector::new(client.clone())),
        Arc::new(MlScorer::new(client)),
    ))
}

/// Run `smartcrop crop`.
pub async fn crop(cropper: &SmartCropper, args: &CropArgs) -> Result<()> {
    let request = CropRequest::new(&args.input, &args.output, args.width, args.height)
        .with_stupid(args.stupid);

    cropper
        .crop(&request)
        .await
        .with_context(|| format!("Failed to crop {}", args.input.display()))?;

    info!(output = %args.output.display(), "Crop written");
    Ok(())
}

/// Run `smartcrop info`; `None` for unsupported files.
pub async fn info(cropper: &SmartCropper, args: &InfoArgs) -> Result<Option<MediaInfo>> {
    cropper
        .info(&args.file)
        .await
        .with_context(|| format!("Failed to inspect {}", args.file.display()))
}

/// Pretty JSON for `info` output.
pub fn render_info(info: &MediaInfo) -> Result<String> {
    serde_json::to_string_pretty(info).context("Failed to serialise media info")
}
