//! Media manager bound to one product: upload, delete, reorder, thumbnail.
//!
//! Every mutation locks the session, makes one call, reloads the whole
//! catalog, refreshes the session's view of the product, then unlocks.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use flowadmin_client::ProgressFn;
use flowadmin_core::{plan_upload, reorder_keys, Media, Product, UploadFile};

use crate::console::Console;
use crate::notify::{percent, Toast};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSession {
    pub product_id: String,
    pub uploading: bool,
    /// Last reported upload progress, 0-100.
    pub progress: u8,
}

impl MediaSession {
    fn new(product_id: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            uploading: false,
            progress: 0,
        }
    }
}

impl Console {
    pub fn open_media(&mut self, product_id: &str) -> bool {
        if self.state.catalog.get(product_id).is_none() {
            self.toast(Toast::error("Product not found"));
            return false;
        }
        self.close_all_modals();
        self.state.media = Some(MediaSession::new(product_id));
        true
    }

    /// The product the media session is bound to, as currently cached.
    #[must_use]
    pub fn media_product(&self) -> Option<&Product> {
        let session = self.state.media.as_ref()?;
        self.state.catalog.get(&session.product_id)
    }

    /// Grid contents in display order.
    #[must_use]
    pub fn media_items(&self) -> Vec<&Media> {
        self.media_product()
            .map(Product::sorted_media)
            .unwrap_or_default()
    }

    /// Returns the bound product id if the session exists and is idle.
    fn lock_media(&mut self) -> Option<String> {
        let Some(session) = self.state.media.as_mut() else {
            self.toast(Toast::error("No product selected"));
            return None;
        };
        if session.uploading {
            tracing::warn!(product_id = %session.product_id, "media operation already in progress");
            return None;
        }
        session.uploading = true;
        Some(session.product_id.clone())
    }

    fn unlock_media(&mut self) {
        if let Some(session) = self.state.media.as_mut() {
            session.uploading = false;
        }
    }

    /// Reloads the catalog and drops the session if its product vanished.
    async fn resync_media(&mut self) {
        self.load_products().await;
        let gone = self
            .state
            .media
            .as_ref()
            .is_some_and(|s| self.state.catalog.get(&s.product_id).is_none());
        if gone {
            tracing::warn!("media session product no longer in catalog");
            self.state.media = None;
        }
    }

    pub async fn upload_media(&mut self, paths: &[PathBuf]) -> bool {
        let Some((current, remaining)) = self
            .media_product()
            .map(|p| (p.media.len(), p.remaining_media_slots()))
        else {
            self.toast(Toast::error("No product selected"));
            return false;
        };
        if remaining == 0 {
            self.toast(Toast::error("Maximum 3 media items reached"));
            return false;
        }

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match UploadFile::from_path(path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read upload candidate");
                    self.toast(Toast::error(format!("Cannot read file: {}", path.display())));
                }
            }
        }

        let plan = plan_upload(current, files);
        if let Some(allowed) = plan.truncated_to {
            self.toast(Toast::warning(format!(
                "Can only upload {allowed} more file(s)"
            )));
        }
        for rejection in &plan.rejected {
            self.toast(Toast::error(rejection.message()));
        }
        if plan.accepted.is_empty() {
            return false;
        }

        let Some(product_id) = self.lock_media() else {
            return false;
        };
        if let Some(session) = self.state.media.as_mut() {
            session.progress = 0;
        }

        let notifier = Arc::clone(&self.notifier);
        let last = Arc::new(AtomicU8::new(0));
        let reported = Arc::clone(&last);
        let progress: ProgressFn = Arc::new(move |sent, total| {
            let pct = percent(sent, total);
            if reported.swap(pct, Ordering::Relaxed) != pct {
                notifier.progress(pct);
            }
        });

        tracing::info!(%product_id, files = plan.accepted.len(), bytes = plan.total_bytes(), "starting upload");
        let result = self
            .client
            .upload_media(&product_id, &plan.accepted, progress)
            .await;
        if let Some(session) = self.state.media.as_mut() {
            session.progress = last.load(Ordering::Relaxed);
            tracing::debug!(progress = session.progress, "upload request finished");
        }

        let ok = match result {
            Ok(upload) => {
                self.toast(Toast::success(format!(
                    "{} file(s) uploaded successfully",
                    upload.uploaded.len()
                )));
                // Keeps the grid current even if the reload below fails.
                if let Some(product) = upload.product {
                    self.state.catalog.replace_product(product);
                }
                self.resync_media().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Upload failed");
                false
            }
        };
        self.unlock_media();
        ok
    }

    pub async fn delete_media(&mut self, key: &str) -> bool {
        if !self.media_items().iter().any(|m| m.key == key) {
            self.toast(Toast::error("Media not found"));
            return false;
        }
        if !self.confirm.confirm("Are you sure you want to delete this media?") {
            return false;
        }
        let Some(product_id) = self.lock_media() else {
            return false;
        };

        let ok = match self.client.delete_media(&product_id, key).await {
            Ok(()) => {
                tracing::info!(%product_id, key, "media deleted");
                self.toast(Toast::success("Media deleted successfully"));
                self.resync_media().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to delete media");
                false
            }
        };
        self.unlock_media();
        ok
    }

    /// Drops `dragged` onto `target` and submits the resulting order.
    /// Unknown keys and self-drops change nothing.
    pub async fn move_media(&mut self, dragged: &str, target: &str) -> bool {
        let keys: Vec<String> = self.media_items().iter().map(|m| m.key.clone()).collect();
        let Some(order) = reorder_keys(&keys, dragged, target) else {
            tracing::debug!(dragged, target, "reorder is a no-op");
            return false;
        };
        let Some(product_id) = self.lock_media() else {
            return false;
        };

        let ok = match self.client.reorder_media(&product_id, &order).await {
            Ok(_) => {
                tracing::info!(%product_id, ?order, "media reordered");
                self.toast(Toast::success("Media reordered successfully"));
                self.resync_media().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to reorder media");
                false
            }
        };
        self.unlock_media();
        ok
    }

    /// Makes an image the product thumbnail. Videos and the current
    /// thumbnail are not eligible.
    pub async fn set_thumbnail(&mut self, media_id: &str) -> bool {
        let eligible = match self.media_items().iter().find(|m| m.media_id() == media_id) {
            None => Err("Media not found"),
            Some(m) if m.is_video() => Err("Videos cannot be used as the thumbnail"),
            Some(m) if m.is_primary => Err("This media is already the thumbnail"),
            Some(_) => Ok(()),
        };
        if let Err(message) = eligible {
            self.toast(Toast::warning(message));
            return false;
        }
        let Some(product_id) = self.lock_media() else {
            return false;
        };

        let ok = match self.client.set_primary_media(&product_id, media_id).await {
            Ok(()) => {
                tracing::info!(%product_id, media_id, "thumbnail updated");
                self.toast(Toast::success("Thumbnail updated successfully"));
                self.resync_media().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to set thumbnail");
                false
            }
        };
        self.unlock_media();
        ok
    }
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
