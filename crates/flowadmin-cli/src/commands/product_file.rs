//! YAML product form files for `products create` and `products edit`.
//!
//! Every field is optional; on edit, absent fields keep the product's
//! current value.

use std::path::Path;

use anyhow::Context;
use flowadmin_core::{PackSizeRow, ValidationError, FLAVOURS};
use serde::Deserialize;

use crate::editor::{replace_pack_size_rows, Editor};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ProductFile {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub flavours: Option<Vec<String>>,
    pub pack_sizes: Option<Vec<PackSizeEntry>>,
    pub ingredients: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PackSizeEntry {
    pub size: String,
    #[serde(default)]
    pub sachets: Option<u32>,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub savings: Option<String>,
}

impl PackSizeEntry {
    fn to_row(&self) -> PackSizeRow {
        PackSizeRow {
            size: self.size.clone(),
            sachets: self.sachets.map(|s| s.to_string()).unwrap_or_default(),
            price: self.price.to_string(),
            original_price: self.original_price.map(|p| p.to_string()).unwrap_or_default(),
            savings: self.savings.clone().unwrap_or_default(),
        }
    }
}

impl ProductFile {
    pub(crate) fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read product file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid product file {}", path.display()))
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    /// Types the file's values into the open form, the way an operator
    /// would: the name first (so a new product's slug follows it), then an
    /// explicit slug if one is given.
    pub(crate) fn apply(&self, editor: &mut Editor) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            editor.set_name(name);
        }
        let form = &mut editor.form;
        if let Some(slug) = &self.slug {
            form.slug.clone_from(slug);
        }
        if let Some(text) = &self.short_description {
            form.short_description.clone_from(text);
        }
        if let Some(text) = &self.description {
            form.description.clone_from(text);
        }
        if let Some(flavours) = &self.flavours {
            for flavour in FLAVOURS {
                form.set_flavour(flavour, false)?;
            }
            for flavour in flavours {
                form.set_flavour(flavour, true)?;
            }
        }
        if let Some(entries) = &self.pack_sizes {
            replace_pack_size_rows(form, entries.iter().map(PackSizeEntry::to_row).collect())?;
        }
        if let Some(ingredients) = &self.ingredients {
            form.ingredients = ingredients.join(", ");
        }
        if let Some(highlights) = &self.highlights {
            form.highlights = highlights.join("\n");
        }
        if let Some(active) = self.is_active {
            form.is_active = active;
        }
        if let Some(featured) = self.is_featured {
            form.is_featured = featured;
        }
        Ok(())
    }
}
