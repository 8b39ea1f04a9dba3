use clap::{Args, Subcommand};
use flowadmin_core::ReviewDraft;

use super::{finish, require_catalog};
use crate::console::{Console, Route};
use crate::notify::Toast;
use crate::render;

/// Sub-commands available under `reviews`.
#[derive(Debug, Subcommand)]
pub enum ReviewsCommands {
    /// Show a product's reviews
    List {
        id: String,
        /// Print HTML instead of text
        #[arg(long)]
        html: bool,
    },
    /// Add a review
    Add {
        id: String,
        #[command(flatten)]
        fields: ReviewFields,
    },
    /// Change an existing review
    Edit {
        id: String,
        review_id: String,
        #[command(flatten)]
        fields: ReviewFields,
    },
    /// Delete a review
    Delete { id: String, review_id: String },
}

/// Review form fields. On edit, absent fields keep their current value.
#[derive(Debug, Default, Args)]
pub struct ReviewFields {
    #[arg(long)]
    author: Option<String>,
    /// Star rating, 1-5 (defaults to 5 for new reviews)
    #[arg(long)]
    rating: Option<u8>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    content: Option<String>,
    /// Verified-purchase badge (defaults to true for new reviews)
    #[arg(long)]
    verified: Option<bool>,
}

impl ReviewFields {
    fn apply(&self, draft: &mut ReviewDraft) -> Result<(), flowadmin_core::ValidationError> {
        if let Some(author) = &self.author {
            draft.author.clone_from(author);
        }
        if let Some(rating) = self.rating {
            draft.rating.select(rating)?;
        }
        if let Some(title) = &self.title {
            draft.title.clone_from(title);
        }
        if let Some(content) = &self.content {
            draft.content.clone_from(content);
        }
        if let Some(verified) = self.verified {
            draft.verified = verified;
        }
        Ok(())
    }
}

impl ReviewsCommands {
    fn product_id(&self) -> &str {
        match self {
            Self::List { id, .. }
            | Self::Add { id, .. }
            | Self::Edit { id, .. }
            | Self::Delete { id, .. } => id,
        }
    }
}

fn fill_draft(console: &mut Console, fields: &ReviewFields) -> anyhow::Result<()> {
    let Some(draft) = console.review_draft_mut() else {
        anyhow::bail!("review form is not open");
    };
    if let Err(e) = fields.apply(draft) {
        console.toast(Toast::error(e.to_string()));
        anyhow::bail!("invalid review: {e}");
    }
    Ok(())
}

pub(crate) async fn run_reviews(
    console: &mut Console,
    command: ReviewsCommands,
) -> anyhow::Result<()> {
    require_catalog(console).await?;
    let product_id = command.product_id().to_string();
    if !console.open_edit(&product_id) {
        anyhow::bail!("product {product_id} not found");
    }

    let (ok, action) = match &command {
        ReviewsCommands::List { html: true, .. } => {
            println!("{}", render::reviews_html(console.editor_reviews()));
            return Ok(());
        }
        ReviewsCommands::List { .. } => (true, "listing reviews"),
        ReviewsCommands::Add { fields, .. } => {
            if !console.open_add_review() {
                anyhow::bail!("no product selected");
            }
            fill_draft(console, fields)?;
            (console.submit_review().await, "saving review")
        }
        ReviewsCommands::Edit {
            review_id, fields, ..
        } => {
            if !console.open_edit_review(review_id) {
                anyhow::bail!("review {review_id} not found");
            }
            fill_draft(console, fields)?;
            (console.submit_review().await, "saving review")
        }
        ReviewsCommands::Delete { review_id, .. } => {
            (console.delete_review(review_id).await, "deleting review")
        }
    };

    if console.state.route == Route::Console {
        print!("{}", render::reviews_text(console.editor_reviews()));
    }
    finish(console, ok, action)
}
