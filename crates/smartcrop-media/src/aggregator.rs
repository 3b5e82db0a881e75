//! Cross-frame crop aggregation.

use tracing::info;

use crate::error::MediaResult;
use smartcrop_models::{AggregatedCrop, CropCandidate};

/// Combine per-frame candidates into one fixed crop window.
///
/// Plain mean of x, y, width and height; scores are ignored. Fails with
/// [`MediaError::InvalidArgument`](crate::MediaError::InvalidArgument) when
/// `candidates` is empty.
pub fn aggregate(candidates: &[CropCandidate]) -> MediaResult<AggregatedCrop> {
    let crop = AggregatedCrop::from_candidates(candidates)?;
    info!(
        count = crop.count,
        x = crop.x,
        y = crop.y,
        width = crop.width,
        height = crop.height,
        "Aggregated crop"
    );
    Ok(crop)
}
