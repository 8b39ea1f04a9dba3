//! Console state and the workflows that do not belong to a single modal:
//! the auth gate, catalog loading, product deletion, and seeding.

use std::sync::Arc;

use flowadmin_client::{AdminClient, ClientError};
use flowadmin_core::{AdminProfile, Catalog, Session, SessionStore};

use crate::editor::EditorState;
use crate::media::MediaSession;
use crate::notify::{Confirm, Notifier, Toast};
use crate::reviews::ReviewEditorState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Login,
    Console,
}

/// Everything the console knows between calls. The catalog is a cache of
/// the server's list and is replaced wholesale on every load.
#[derive(Debug, Default)]
pub struct AppState {
    pub route: Route,
    pub admin: Option<AdminProfile>,
    pub catalog: Catalog,
    pub editor: EditorState,
    pub review_editor: ReviewEditorState,
    pub media: Option<MediaSession>,
}

pub struct Console {
    pub(crate) client: AdminClient,
    pub(crate) session: SessionStore,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) confirm: Box<dyn Confirm>,
    pub state: AppState,
}

impl Console {
    pub fn new(
        client: AdminClient,
        session: SessionStore,
        notifier: Arc<dyn Notifier>,
        confirm: Box<dyn Confirm>,
    ) -> Self {
        Self {
            client,
            session,
            notifier,
            confirm,
            state: AppState::default(),
        }
    }

    pub(crate) fn toast(&self, toast: Toast) {
        self.notifier.notify(toast);
    }

    /// Routes a failed call: `401` ends the session, anything else becomes an
    /// error toast with the server's message or `fallback`.
    pub(crate) fn fail(&mut self, err: &ClientError, fallback: &str) {
        if err.is_unauthorized() {
            tracing::warn!("session rejected by server; logging out");
            self.logout();
            return;
        }
        tracing::error!(error = %err, "{fallback}");
        let message = err.server_message().unwrap_or(fallback).to_string();
        self.toast(Toast::error(message));
    }

    /// Auth gate. Without a stored token the console routes to login with no
    /// network call; otherwise the token is verified once against `/me`.
    pub async fn boot(&mut self) -> bool {
        let stored = match self.session.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable session file");
                None
            }
        };
        let Some(session) = stored else {
            tracing::debug!("no stored token; routing to login");
            self.state.route = Route::Login;
            return false;
        };

        self.client.set_token(session.token);
        match self.client.me().await {
            Ok(profile) => {
                if let Err(e) = self.session.save_profile(&profile) {
                    tracing::warn!(error = %e, "failed to cache admin profile");
                }
                tracing::info!(admin = profile.display_name(), role = %profile.role.label(), "session verified");
                self.state.admin = Some(profile);
                self.state.route = Route::Console;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "token verification failed");
                self.logout();
                false
            }
        }
    }

    /// Stores an externally issued token and runs the auth gate with it.
    pub async fn login(&mut self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() {
            self.toast(Toast::error("Token is required"));
            return false;
        }
        let session = Session {
            token: token.to_string(),
            profile: None,
        };
        if let Err(e) = self.session.save(&session) {
            tracing::error!(error = %e, "failed to store session");
            self.toast(Toast::error("Failed to store session"));
            return false;
        }
        self.boot().await
    }

    /// Drops the token and cached profile and resets all view state.
    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "failed to remove session file");
        }
        self.client.clear_token();
        self.state = AppState::default();
    }

    pub async fn load_products(&mut self) -> bool {
        self.notifier.loading(true);
        let result = self.client.list_products().await;
        self.notifier.loading(false);

        match result {
            Ok(products) => {
                tracing::debug!(count = products.len(), "catalog loaded");
                self.state.catalog.replace_all(products);
                true
            }
            Err(e) if e.is_unauthorized() => {
                self.fail(&e, "Failed to load products");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load products");
                self.toast(Toast::error("Failed to load products"));
                false
            }
        }
    }

    pub fn close_all_modals(&mut self) {
        self.state.editor = EditorState::Closed;
        self.state.review_editor = ReviewEditorState::Closed;
        self.state.media = None;
    }

    pub async fn delete_product(&mut self, product_id: &str) -> bool {
        if self.state.catalog.get(product_id).is_none() {
            self.toast(Toast::error("Product not found"));
            return false;
        }
        if !self
            .confirm
            .confirm("Are you sure you want to delete this product?")
        {
            return false;
        }

        match self.client.delete_product(product_id).await {
            Ok(()) => {
                tracing::info!(product_id, "product deleted");
                self.toast(Toast::success("Product deleted successfully"));
                self.close_all_modals();
                self.load_products().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to delete product");
                false
            }
        }
    }

    pub async fn seed(&mut self) -> bool {
        if !self
            .confirm
            .confirm("This will add sample products to the database. Continue?")
        {
            return false;
        }

        match self.client.seed_products().await {
            Ok(()) => {
                tracing::info!("database seeded");
                self.toast(Toast::success("Database seeded successfully"));
                self.load_products().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to seed database");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;
