//! Response envelopes used by the admin API.

use flowadmin_core::{Media, Product};
use serde::{Deserialize, Serialize};

/// `{ "data": ... }`, used by `/me` and the reorder endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// `{ "data": [...] }` for the product list; a missing `data` means no products.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope {
    #[serde(default)]
    pub data: Option<Vec<Product>>,
}

/// Review calls echo the full parent product.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub product: Product,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadEnvelope {
    #[serde(default)]
    pub data: Vec<Media>,
    #[serde(default)]
    pub product: Option<Product>,
}

/// Error body: `{ "error": "..." }`, sometimes `{ "message": "..." }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReorderBody<'a> {
    pub order: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrimaryBody {
    pub is_primary: bool,
}

/// Outcome of a media upload batch.
#[derive(Debug, Clone)]
pub struct UploadResult {
    /// The media items the server created for this batch.
    pub uploaded: Vec<Media>,
    /// The parent product after the upload, when the server included it.
    pub product: Option<Product>,
}
