//! Product form model: raw field values as the operator typed them, and the
//! serialization/validation step that turns them into a request body.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;
use crate::products::{PackSize, Product, FLAVOURS};

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static slug pattern is valid"));

/// Derive a URL-safe slug from a product name: lowercase, runs of anything
/// outside `[a-z0-9]` collapse to `-`, no leading or trailing dash.
#[must_use]
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// One editable pack-size row. Values are kept as raw input text and only
/// parsed on serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackSizeRow {
    pub size: String,
    pub sachets: String,
    pub price: String,
    pub original_price: String,
    pub savings: String,
}

impl PackSizeRow {
    #[must_use]
    pub fn from_pack_size(pack: &PackSize) -> Self {
        Self {
            size: pack.size.clone(),
            sachets: pack.sachets.to_string(),
            price: format_number(pack.price),
            original_price: format_number(pack.original_price),
            savings: pack.savings.clone().unwrap_or_default(),
        }
    }

    fn to_pack_size(&self) -> PackSize {
        let savings = self.savings.trim();
        PackSize {
            size: self.size.trim().to_string(),
            sachets: self.sachets.trim().parse().unwrap_or(0),
            price: parse_price(&self.price),
            original_price: parse_price(&self.original_price),
            savings: (!savings.is_empty()).then(|| savings.to_string()),
        }
    }
}

/// The product create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    /// Comma-separated, as typed.
    pub ingredients: String,
    /// One highlight per line, as typed.
    pub highlights: String,
    pub is_active: bool,
    pub is_featured: bool,
    flavours: Vec<String>,
    pack_sizes: Vec<PackSizeRow>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            short_description: String::new(),
            description: String::new(),
            ingredients: String::new(),
            highlights: String::new(),
            is_active: true,
            is_featured: false,
            flavours: Vec::new(),
            pack_sizes: Vec::new(),
        }
    }
}

impl ProductForm {
    /// Empty form with a single blank pack-size row.
    #[must_use]
    pub fn blank() -> Self {
        let mut form = Self::default();
        form.pack_sizes.push(PackSizeRow::default());
        form
    }

    /// Form pre-populated from a cached product. Only flavours from the
    /// fixed [`FLAVOURS`] list can be ticked.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let mut pack_sizes: Vec<PackSizeRow> = product
            .pack_sizes
            .iter()
            .map(PackSizeRow::from_pack_size)
            .collect();
        if pack_sizes.is_empty() {
            pack_sizes.push(PackSizeRow::default());
        }

        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            short_description: product.short_description.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            ingredients: product.ingredients.join(", "),
            highlights: product.highlights.join("\n"),
            is_active: product.is_active,
            is_featured: product.is_featured,
            flavours: FLAVOURS
                .iter()
                .filter(|f| product.flavours.iter().any(|pf| pf == *f))
                .map(|f| (*f).to_string())
                .collect(),
            pack_sizes,
        }
    }

    #[must_use]
    pub fn flavours(&self) -> &[String] {
        &self.flavours
    }

    #[must_use]
    pub fn is_flavour_selected(&self, flavour: &str) -> bool {
        self.flavours.iter().any(|f| f == flavour)
    }

    /// Ticks or unticks a flavour checkbox. Selected flavours stay in
    /// [`FLAVOURS`] order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownFlavour`] for a flavour outside the
    /// fixed list.
    pub fn set_flavour(&mut self, flavour: &str, selected: bool) -> Result<(), ValidationError> {
        let Some(canonical) = FLAVOURS
            .iter()
            .copied()
            .find(|f| f.eq_ignore_ascii_case(flavour))
        else {
            return Err(ValidationError::UnknownFlavour(flavour.to_string()));
        };

        let currently = self.is_flavour_selected(canonical);
        if selected && !currently {
            self.flavours.push(canonical.to_string());
            self.flavours
                .sort_by_key(|f| FLAVOURS.iter().position(|c| *c == f.as_str()));
        } else if !selected && currently {
            self.flavours.retain(|f| f != canonical);
        }
        Ok(())
    }

    #[must_use]
    pub fn pack_size_rows(&self) -> &[PackSizeRow] {
        &self.pack_sizes
    }

    pub fn pack_size_row_mut(&mut self, index: usize) -> Option<&mut PackSizeRow> {
        self.pack_sizes.get_mut(index)
    }

    pub fn add_pack_size_row(&mut self, row: PackSizeRow) {
        self.pack_sizes.push(row);
    }

    /// Removes the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LastPackSizeRow`] if it is the only row
    /// left (the form always keeps at least one), or
    /// [`ValidationError::NoSuchPackSizeRow`] for an out-of-range index.
    pub fn remove_pack_size_row(&mut self, index: usize) -> Result<PackSizeRow, ValidationError> {
        if self.pack_sizes.len() <= 1 {
            return Err(ValidationError::LastPackSizeRow);
        }
        if index >= self.pack_sizes.len() {
            return Err(ValidationError::NoSuchPackSizeRow(index));
        }
        Ok(self.pack_sizes.remove(index))
    }

    /// Serialize every field into a request body. Text is trimmed, numbers
    /// fall back to 0, and pack rows without a size or a positive price are
    /// dropped.
    #[must_use]
    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.trim().to_string(),
            slug: self.slug.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            description: self.description.trim().to_string(),
            flavours: self.flavours.clone(),
            pack_sizes: self
                .pack_sizes
                .iter()
                .map(PackSizeRow::to_pack_size)
                .filter(|p| !p.size.is_empty() && p.price > 0.0)
                .collect(),
            ingredients: split_list(&self.ingredients, ','),
            highlights: split_list(&self.highlights, '\n'),
            is_active: self.is_active,
            is_featured: self.is_featured,
        }
    }
}

/// Body of `POST /products/admin` and `PUT /products/admin/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub flavours: Vec<String>,
    pub pack_sizes: Vec<PackSize>,
    pub ingredients: Vec<String>,
    pub highlights: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

impl ProductPayload {
    /// Checks required fields in display order and reports the first gap.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first missing field: name,
    /// slug, flavours, then pack sizes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.slug.is_empty() {
            return Err(ValidationError::MissingSlug);
        }
        if self.flavours.is_empty() {
            return Err(ValidationError::NoFlavours);
        }
        if self.pack_sizes.is_empty() {
            return Err(ValidationError::NoPackSizes);
        }
        Ok(())
    }
}

fn parse_price(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
