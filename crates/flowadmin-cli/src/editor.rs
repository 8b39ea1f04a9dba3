//! Product editor: create/edit state machine around a [`ProductForm`].

use flowadmin_core::{slugify, PackSizeRow, Product, ProductForm, ValidationError};

use crate::console::Console;
use crate::notify::Toast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { product_id: String },
}

#[derive(Debug, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Open(Editor),
}

impl EditorState {
    #[must_use]
    pub fn as_open(&self) -> Option<&Editor> {
        match self {
            Self::Open(editor) => Some(editor),
            Self::Closed => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut Editor> {
        match self {
            Self::Open(editor) => Some(editor),
            Self::Closed => None,
        }
    }
}

#[derive(Debug)]
pub struct Editor {
    pub mode: EditorMode,
    pub form: ProductForm,
    /// Cached copy of the product being edited; the review manager reads and
    /// replaces it.
    pub product: Option<Product>,
}

impl Editor {
    pub(crate) fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: ProductForm::blank(),
            product: None,
        }
    }

    pub(crate) fn edit(product: &Product) -> Self {
        Self {
            mode: EditorMode::Edit {
                product_id: product.id.clone(),
            },
            form: ProductForm::from_product(product),
            product: Some(product.clone()),
        }
    }

    #[must_use]
    pub fn is_create(&self) -> bool {
        self.mode == EditorMode::Create
    }

    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::Edit { product_id } => Some(product_id),
            EditorMode::Create => None,
        }
    }

    /// Updates the name; a new product's slug follows it.
    pub fn set_name(&mut self, name: &str) {
        self.form.name = name.to_string();
        if self.is_create() {
            self.form.slug = slugify(name);
        }
    }
}

impl Console {
    pub fn open_create(&mut self) {
        self.close_all_modals();
        self.state.editor = EditorState::Open(Editor::create());
    }

    pub fn open_edit(&mut self, product_id: &str) -> bool {
        let Some(product) = self.state.catalog.get(product_id) else {
            self.toast(Toast::error("Product not found"));
            return false;
        };
        let editor = Editor::edit(product);
        self.close_all_modals();
        self.state.editor = EditorState::Open(editor);
        true
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        self.state.editor.as_open_mut()
    }

    pub fn remove_pack_size_row(&mut self, index: usize) -> bool {
        let Some(editor) = self.editor_mut() else {
            return false;
        };
        match editor.form.remove_pack_size_row(index) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(index, error = %e, "pack size row not removed");
                self.toast(Toast::error(e.to_string()));
                false
            }
        }
    }

    /// Serializes, validates, and saves the open form. Invalid input is
    /// reported locally and never reaches the server. Holding `&mut self`
    /// across the call keeps a second save from starting meanwhile.
    pub async fn submit_product(&mut self) -> bool {
        let Some(editor) = self.editor_mut() else {
            return false;
        };

        let payload = editor.form.to_payload();
        let mode = editor.mode.clone();
        if let Err(e) = payload.validate() {
            tracing::warn!(error = %e, "product form rejected");
            self.toast(Toast::error(e.to_string()));
            return false;
        }

        let result = match &mode {
            EditorMode::Create => self.client.create_product(&payload).await,
            EditorMode::Edit { product_id } => {
                self.client.update_product(product_id, &payload).await
            }
        };

        match result {
            Ok(()) => {
                let message = match mode {
                    EditorMode::Create => "Product created successfully",
                    EditorMode::Edit { .. } => "Product updated successfully",
                };
                tracing::info!(slug = %payload.slug, "{message}");
                self.toast(Toast::success(message));
                self.close_all_modals();
                self.load_products().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to save product");
                false
            }
        }
    }
}

/// Replaces every pack-size row with `rows`, keeping at least one row.
pub(crate) fn replace_pack_size_rows(
    form: &mut ProductForm,
    rows: Vec<PackSizeRow>,
) -> Result<(), ValidationError> {
    let existing = form.pack_size_rows().len();
    if rows.is_empty() {
        form.add_pack_size_row(PackSizeRow::default());
    }
    for row in rows {
        form.add_pack_size_row(row);
    }
    for _ in 0..existing {
        form.remove_pack_size_row(0)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
