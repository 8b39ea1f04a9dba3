//! Media endpoints: multipart upload with byte-level progress, reorder,
//! delete, and thumbnail selection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Body;

use flowadmin_core::{Media, UploadFile};

use crate::client::{encode_segment, AdminClient};
use crate::error::ClientError;
use crate::types::{DataEnvelope, PrimaryBody, ReorderBody, UploadEnvelope, UploadResult};

/// Multipart field name the upload endpoint expects.
const MEDIA_FIELD: &str = "media";

/// Bytes handed to the HTTP body per progress tick.
const CHUNK_SIZE: usize = 64 * 1024;

/// Upload progress callback: `(bytes_sent, bytes_total)`.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

impl AdminClient {
    /// Uploads a batch of files as one multipart request.
    ///
    /// `progress` is called as body chunks are handed to the connection, so
    /// the last call reports `(total, total)`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Io`] if a file cannot be read.
    /// - [`ClientError::Unauthorized`] on `401`.
    /// - [`ClientError::Api`] / [`ClientError::Http`] on other failures.
    /// - [`ClientError::Deserialize`] if the body is not an upload envelope.
    pub async fn upload_media(
        &self,
        product_id: &str,
        files: &[UploadFile],
        progress: ProgressFn,
    ) -> Result<UploadResult, ClientError> {
        let mut contents = Vec::with_capacity(files.len());
        for file in files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|e| ClientError::Io {
                    path: file.path.display().to_string(),
                    source: e,
                })?;
            contents.push((file, bytes));
        }

        let total: u64 = contents.iter().map(|(_, bytes)| bytes.len() as u64).sum();
        let sent = Arc::new(AtomicU64::new(0));
        let mut form = Form::new();

        for (file, bytes) in contents {
            let length = bytes.len() as u64;
            let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
            let sent = Arc::clone(&sent);
            let progress = Arc::clone(&progress);
            let stream = futures::stream::iter(chunks).map(move |chunk| {
                let now = sent.fetch_add(chunk.len() as u64, Ordering::Relaxed)
                    + chunk.len() as u64;
                progress(now, total);
                Ok::<_, std::io::Error>(chunk)
            });

            let part = Part::stream_with_length(Body::wrap_stream(stream), length)
                .file_name(file.name.clone())
                .mime_str(&file.mime)?;
            form = form.part(MEDIA_FIELD, part);
        }

        let url = format!("{}/media", self.upload_url(product_id));
        tracing::info!(product_id, files = files.len(), total_bytes = total, "uploading media batch");
        let envelope: UploadEnvelope = self
            .send_json(
                self.http.post(&url).multipart(form),
                &format!("POST /products/{product_id}/media"),
            )
            .await?;

        Ok(UploadResult {
            uploaded: envelope.data,
            product: envelope.product,
        })
    }

    /// Submits a complete new ordering of the product's media keys.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on `401`.
    /// - [`ClientError::Api`] / [`ClientError::Http`] on other failures.
    /// - [`ClientError::Deserialize`] if the body is not `{ data: [media] }`.
    pub async fn reorder_media(
        &self,
        product_id: &str,
        order: &[String],
    ) -> Result<Vec<Media>, ClientError> {
        let url = format!("{}/media/reorder", self.upload_url(product_id));
        let envelope: DataEnvelope<Vec<Media>> = self
            .send_json(
                self.http.put(&url).json(&ReorderBody { order }),
                &format!("PUT /products/{product_id}/media/reorder"),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Deletes one media item by its storage key.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] on `401`, [`ClientError::Api`] otherwise.
    pub async fn delete_media(&self, product_id: &str, key: &str) -> Result<(), ClientError> {
        let url = format!(
            "{}/media/{}",
            self.upload_url(product_id),
            encode_segment(key)
        );
        self.send_unit(
            self.http.delete(&url),
            &format!("DELETE /products/{product_id}/media/{key}"),
        )
        .await
    }

    /// Marks a media item as the product thumbnail.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] on `401`, [`ClientError::Api`] otherwise.
    pub async fn set_primary_media(
        &self,
        product_id: &str,
        media_id: &str,
    ) -> Result<(), ClientError> {
        let url = format!(
            "{}/media/{}",
            self.upload_url(product_id),
            encode_segment(media_id)
        );
        self.send_unit(
            self.http
                .patch(&url)
                .json(&PrimaryBody { is_primary: true }),
            &format!("PATCH /products/{product_id}/media/{media_id}"),
        )
        .await
    }

    fn upload_url(&self, product_id: &str) -> String {
        format!(
            "{}/products/{}",
            self.endpoints.upload_base,
            encode_segment(product_id)
        )
    }
}
