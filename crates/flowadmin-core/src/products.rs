use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Flavour tags an operator can select in the product form.
pub const FLAVOURS: &[&str] = &[
    "Lemon",
    "Orange",
    "Watermelon",
    "Mixed Berry",
    "Green Apple",
    "Mango",
];

/// Upper bound on media items attached to one product.
pub const MAX_MEDIA_PER_PRODUCT: usize = 3;

/// A catalog item as the server returns it. The client only ever holds a
/// cached copy; every mutation goes through the API and the copy is
/// replaced afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Flavour names. The server sometimes sends `{ "name": ... }` objects
    /// instead of plain strings; both are accepted.
    #[serde(default, deserialize_with = "flavour_names")]
    pub flavours: Vec<String>,
    #[serde(default)]
    pub pack_sizes: Vec<PackSize>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl Product {
    /// Media sorted by `sort_order`, the order the grid displays.
    #[must_use]
    pub fn sorted_media(&self) -> Vec<&Media> {
        let mut media: Vec<&Media> = self.media.iter().collect();
        media.sort_by_key(|m| m.sort_order);
        media
    }

    /// How many more media items the product can take.
    #[must_use]
    pub fn remaining_media_slots(&self) -> usize {
        MAX_MEDIA_PER_PRODUCT.saturating_sub(self.media.len())
    }

    #[must_use]
    pub fn find_review(&self, review_id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == review_id)
    }

    #[must_use]
    pub fn lowest_price(&self) -> f64 {
        lowest_price(&self.pack_sizes)
    }
}

/// One purchasable pack, e.g. `"Pack of 10"` at 299.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackSize {
    pub size: String,
    #[serde(default)]
    pub sachets: u32,
    pub price: f64,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Storage key, unique within the product.
    pub key: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaType,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub alt: Option<String>,
}

impl Media {
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind == MediaType::Video
    }

    /// Identifier used by the thumbnail endpoint; falls back to the storage
    /// key when the server did not send an `_id`.
    #[must_use]
    pub fn media_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub author: String,
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default = "default_verified")]
    pub verified: bool,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
}

fn default_verified() -> bool {
    true
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates. Anything else
/// reads as no date, so one odd record does not fail the whole list.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(parse_review_date))
}

fn parse_review_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Lowest pack price, or `0.0` when there are no pack sizes.
#[must_use]
pub fn lowest_price(pack_sizes: &[PackSize]) -> f64 {
    pack_sizes
        .iter()
        .map(|p| p.price)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

fn flavour_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlavourRef {
        Name(String),
        Named { name: String },
    }

    let refs = Option::<Vec<FlavourRef>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(refs
        .into_iter()
        .map(|f| match f {
            FlavourRef::Name(name) | FlavourRef::Named { name } => name,
        })
        .collect())
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
