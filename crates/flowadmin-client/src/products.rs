//! Product CRUD and seeding endpoints.

use flowadmin_core::{Product, ProductPayload};

use crate::client::{encode_segment, AdminClient};
use crate::error::ClientError;
use crate::types::ListEnvelope;

impl AdminClient {
    /// Fetches every product, active or not.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on `401`.
    /// - [`ClientError::Api`] / [`ClientError::Http`] on other failures.
    /// - [`ClientError::Deserialize`] if the body is not a product list envelope.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = format!("{}/products/admin/all", self.endpoints.api_base);
        let envelope: ListEnvelope = self
            .send_json(self.http.get(&url), "GET /products/admin/all")
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] on `401`; [`ClientError::Api`] carries
    /// the server's message (duplicate slug and so on).
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<(), ClientError> {
        let url = format!("{}/products/admin", self.endpoints.api_base);
        self.send_unit(self.http.post(&url).json(payload), "POST /products/admin")
            .await
    }

    /// Replaces a product's editable fields.
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::create_product`].
    pub async fn update_product(
        &self,
        product_id: &str,
        payload: &ProductPayload,
    ) -> Result<(), ClientError> {
        let url = format!(
            "{}/products/admin/{}",
            self.endpoints.api_base,
            encode_segment(product_id)
        );
        self.send_unit(
            self.http.put(&url).json(payload),
            &format!("PUT /products/admin/{product_id}"),
        )
        .await
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] on `401`, [`ClientError::Api`] otherwise.
    pub async fn delete_product(&self, product_id: &str) -> Result<(), ClientError> {
        let url = format!(
            "{}/products/admin/{}",
            self.endpoints.api_base,
            encode_segment(product_id)
        );
        self.send_unit(
            self.http.delete(&url),
            &format!("DELETE /products/admin/{product_id}"),
        )
        .await
    }

    /// Asks the server to insert its sample products.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] on `401`, [`ClientError::Api`] otherwise.
    pub async fn seed_products(&self) -> Result<(), ClientError> {
        let url = format!("{}/products/admin/seed", self.endpoints.api_base);
        self.send_unit(self.http.post(&url), "POST /products/admin/seed")
            .await
    }
}
