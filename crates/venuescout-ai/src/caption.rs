//! Captioning pass over finalized records.

use tracing::{debug, warn};
use venuescout_core::FinalRecord;

use crate::collaborators::ImageCaptioner;
use crate::error::{AgentError, CollaboratorError};

/// Caption every image of `record` in place.
///
/// A failed or empty caption leaves the entry as it was. Only the caption
/// and hashtags of existing entries are touched.
pub async fn caption_images(
    captioner: &dyn ImageCaptioner,
    record: &mut FinalRecord,
) -> Result<(), AgentError> {
    for (name, image) in record.images.iter_mut() {
        match captioner.caption(&image.url).await {
            Ok(details) if details.caption.trim().is_empty() => {
                debug!(image = %name, url = %image.url, "captioner returned nothing");
            }
            Ok(details) => {
                image.caption = details.caption;
                image.hashtags = details.hashtags;
            }
            Err(CollaboratorError::PolicyIntervention(reason)) => {
                warn!(image = %name, reason = %reason, "policy intervention while captioning");
                return Err(AgentError::PolicyIntervention(reason));
            }
            Err(CollaboratorError::Transient(reason)) => {
                warn!(image = %name, url = %image.url, reason = %reason, "caption failed");
            }
        }
    }
    Ok(())
}
