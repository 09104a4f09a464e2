//! School profile service.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::UploadPart;
use schooladmin_entity::school::{
    AboutDetails, AddressDetails, ImageFields, Location, SchoolProfile, SchoolProfileEnvelope,
};
use schooladmin_http::ApiClient;

use super::images::ImageUpload;
use crate::context::AdminContext;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
}

/// Reads and edits the profile of the administrator's school.
#[derive(Debug, Clone)]
pub struct SchoolService {
    api: ApiClient,
}

impl SchoolService {
    /// Creates a new school service.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the full profile.
    pub async fn profile(&self, ctx: &AdminContext) -> AppResult<SchoolProfile> {
        self.api.get(ctx.school_path("/profile"), Vec::new()).await
    }

    /// Save the name and address section.
    pub async fn update_address(
        &self,
        ctx: &AdminContext,
        details: &AddressDetails,
    ) -> AppResult<SchoolProfile> {
        details.validate()?;
        let profile = self.put_profile(ctx, details).await?;
        info!(school_id = %ctx.school_id, "School details updated");
        Ok(profile)
    }

    /// Save the about lists. Blank entries are dropped first.
    pub async fn update_about(
        &self,
        ctx: &AdminContext,
        details: &AboutDetails,
    ) -> AppResult<SchoolProfile> {
        let details = details.normalized();
        details.validate()?;
        let profile = self.put_profile(ctx, &details).await?;
        info!(
            school_id = %ctx.school_id,
            amenities = details.amenities.len(),
            services_offered = details.services_offered.len(),
            "School about section updated"
        );
        Ok(profile)
    }

    /// Save map coordinates.
    pub async fn update_location(
        &self,
        ctx: &AdminContext,
        location: Location,
    ) -> AppResult<SchoolProfile> {
        location.validate()?;
        let envelope: SchoolProfileEnvelope =
            self.api.put(ctx.school_path("/location"), &location).await?;
        info!(school_id = %ctx.school_id, "School location updated");
        self.unwrap_envelope(ctx, envelope).await
    }

    /// Upload one file and return its public URL.
    pub async fn upload_image(&self, ctx: &AdminContext, part: UploadPart) -> AppResult<String> {
        let file_name = part.file_name.clone();
        let response: UploadResponse = self.api.upload(ctx.school_path("/upload"), part).await?;
        response
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::internal(format!("Upload of {file_name} returned no URL")))
    }

    /// Upload every image, then store the URLs on the profile.
    ///
    /// Uploads run in order and stop at the first failure; the profile is
    /// only written once every file is stored.
    pub async fn update_images(
        &self,
        ctx: &AdminContext,
        uploads: Vec<ImageUpload>,
    ) -> AppResult<SchoolProfile> {
        if uploads.is_empty() {
            return Err(AppError::validation("Select at least one image to upload"));
        }

        let total = uploads.len();
        let mut fields = ImageFields::default();
        for (done, upload) in uploads.into_iter().enumerate() {
            let slot = upload.slot;
            let url = self.upload_image(ctx, upload.part).await.map_err(|e| {
                warn!(school_id = %ctx.school_id, %slot, error = %e, "Image upload failed");
                AppError {
                    message: format!(
                        "Upload failed for {slot} ({done} of {total} uploaded, profile unchanged): {}",
                        e.message
                    ),
                    ..e
                }
            })?;
            fields.set(slot, url);
        }

        let profile = self.put_profile(ctx, &fields).await?;
        info!(school_id = %ctx.school_id, images = total, "School images updated");
        Ok(profile)
    }

    async fn put_profile<B: Serialize + ?Sized>(
        &self,
        ctx: &AdminContext,
        body: &B,
    ) -> AppResult<SchoolProfile> {
        let envelope: SchoolProfileEnvelope = self.api.put(ctx.school_path("/profile"), body).await?;
        self.unwrap_envelope(ctx, envelope).await
    }

    // Some deployments answer updates with only a message; re-read in that case.
    async fn unwrap_envelope(
        &self,
        ctx: &AdminContext,
        envelope: SchoolProfileEnvelope,
    ) -> AppResult<SchoolProfile> {
        match envelope.school {
            Some(profile) => Ok(profile),
            None => self.profile(ctx).await,
        }
    }
}
