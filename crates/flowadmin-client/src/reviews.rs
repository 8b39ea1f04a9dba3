//! Review endpoints. Every call returns the updated parent product.

use flowadmin_core::{Product, ReviewPayload};

use crate::client::{encode_segment, AdminClient};
use crate::error::ClientError;
use crate::types::ProductEnvelope;

impl AdminClient {
    /// Adds a review to a product.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on `401`.
    /// - [`ClientError::Api`] / [`ClientError::Http`] on other failures.
    /// - [`ClientError::Deserialize`] if the body lacks the `product` document.
    pub async fn add_review(
        &self,
        product_id: &str,
        review: &ReviewPayload,
    ) -> Result<Product, ClientError> {
        let url = format!("{}/reviews", self.product_url(product_id));
        let envelope: ProductEnvelope = self
            .send_json(
                self.http.post(&url).json(review),
                &format!("POST /products/admin/{product_id}/reviews"),
            )
            .await?;
        Ok(envelope.product)
    }

    /// Replaces an existing review.
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::add_review`].
    pub async fn update_review(
        &self,
        product_id: &str,
        review_id: &str,
        review: &ReviewPayload,
    ) -> Result<Product, ClientError> {
        let url = format!(
            "{}/reviews/{}",
            self.product_url(product_id),
            encode_segment(review_id)
        );
        let envelope: ProductEnvelope = self
            .send_json(
                self.http.put(&url).json(review),
                &format!("PUT /products/admin/{product_id}/reviews/{review_id}"),
            )
            .await?;
        Ok(envelope.product)
    }

    /// Deletes a review.
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::add_review`].
    pub async fn delete_review(
        &self,
        product_id: &str,
        review_id: &str,
    ) -> Result<Product, ClientError> {
        let url = format!(
            "{}/reviews/{}",
            self.product_url(product_id),
            encode_segment(review_id)
        );
        let envelope: ProductEnvelope = self
            .send_json(
                self.http.delete(&url),
                &format!("DELETE /products/admin/{product_id}/reviews/{review_id}"),
            )
            .await?;
        Ok(envelope.product)
    }

    fn product_url(&self, product_id: &str) -> String {
        format!(
            "{}/products/admin/{}",
            self.endpoints.api_base,
            encode_segment(product_id)
        )
    }
}
