//! Review manager. Only usable while the product editor is open on an
//! existing product; every call returns the updated product, which replaces
//! the cached copy without a catalog reload.

use flowadmin_client::ClientError;
use flowadmin_core::{Product, Review, ReviewDraft};

use crate::console::Console;
use crate::notify::Toast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewMode {
    Add,
    Edit { review_id: String },
}

#[derive(Debug, Default)]
pub enum ReviewEditorState {
    #[default]
    Closed,
    Open { mode: ReviewMode, draft: ReviewDraft },
}

impl Console {
    /// Id of the product open in the editor, if it is a saved product.
    fn review_target(&mut self) -> Option<String> {
        let id = self
            .state
            .editor
            .as_open()
            .and_then(|e| e.product_id())
            .map(ToString::to_string);
        if id.is_none() {
            self.toast(Toast::error("No product selected"));
        }
        id
    }

    /// Reviews of the product open in the editor.
    #[must_use]
    pub fn editor_reviews(&self) -> &[Review] {
        self.state
            .editor
            .as_open()
            .and_then(|e| e.product.as_ref())
            .map(|p| p.reviews.as_slice())
            .unwrap_or_default()
    }

    pub fn open_add_review(&mut self) -> bool {
        if self.review_target().is_none() {
            return false;
        }
        self.state.review_editor = ReviewEditorState::Open {
            mode: ReviewMode::Add,
            draft: ReviewDraft::default(),
        };
        true
    }

    pub fn open_edit_review(&mut self, review_id: &str) -> bool {
        if self.review_target().is_none() {
            return false;
        }
        let review = self
            .state
            .editor
            .as_open()
            .and_then(|e| e.product.as_ref())
            .and_then(|p| p.find_review(review_id));
        let Some(review) = review else {
            self.toast(Toast::error("Review not found"));
            return false;
        };
        let draft = ReviewDraft::from_review(review);
        self.state.review_editor = ReviewEditorState::Open {
            mode: ReviewMode::Edit {
                review_id: review_id.to_string(),
            },
            draft,
        };
        true
    }

    pub fn review_draft_mut(&mut self) -> Option<&mut ReviewDraft> {
        match &mut self.state.review_editor {
            ReviewEditorState::Open { draft, .. } => Some(draft),
            ReviewEditorState::Closed => None,
        }
    }

    pub async fn submit_review(&mut self) -> bool {
        let Some(product_id) = self.review_target() else {
            return false;
        };
        let ReviewEditorState::Open { mode, draft } = &self.state.review_editor else {
            return false;
        };
        let mode = mode.clone();
        let payload = match draft.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "review form rejected");
                self.toast(Toast::error(e.to_string()));
                return false;
            }
        };

        let result = match &mode {
            ReviewMode::Add => self.client.add_review(&product_id, &payload).await,
            ReviewMode::Edit { review_id } => {
                self.client
                    .update_review(&product_id, review_id, &payload)
                    .await
            }
        };
        let message = match mode {
            ReviewMode::Add => "Review added successfully",
            ReviewMode::Edit { .. } => "Review updated successfully",
        };
        let ok = self.apply_review_result(result, message, "Failed to save review");
        if ok {
            self.state.review_editor = ReviewEditorState::Closed;
        }
        ok
    }

    pub async fn delete_review(&mut self, review_id: &str) -> bool {
        let Some(product_id) = self.review_target() else {
            return false;
        };
        if !self
            .confirm
            .confirm("Are you sure you want to delete this review?")
        {
            return false;
        }
        let result = self.client.delete_review(&product_id, review_id).await;
        self.apply_review_result(result, "Review deleted successfully", "Failed to delete review")
    }

    fn apply_review_result(
        &mut self,
        result: Result<Product, ClientError>,
        success: &str,
        fallback: &str,
    ) -> bool {
        match result {
            Ok(product) => {
                tracing::info!(product_id = %product.id, reviews = product.reviews.len(), "{success}");
                if let Some(editor) = self.editor_mut() {
                    editor.product = Some(product.clone());
                }
                if !self.state.catalog.replace_product(product) {
                    tracing::warn!("updated product is not in the cached catalog");
                }
                self.toast(Toast::success(success));
                true
            }
            Err(e) => {
                self.fail(&e, fallback);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "reviews_test.rs"]
mod tests;
