use std::path::PathBuf;

use clap::Subcommand;

use super::{finish, require_catalog};
use crate::console::Console;
use crate::render;

/// Sub-commands available under `media`.
#[derive(Debug, Subcommand)]
pub enum MediaCommands {
    /// Show a product's media grid
    List { id: String },
    /// Upload images or videos in one batch
    Upload {
        id: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Delete one media item by storage key
    Delete { id: String, key: String },
    /// Drop the media item DRAGGED onto the position of ONTO
    Move {
        id: String,
        dragged: String,
        onto: String,
    },
    /// Make an image the product thumbnail
    Thumbnail { id: String, media_id: String },
}

impl MediaCommands {
    fn product_id(&self) -> &str {
        match self {
            Self::List { id }
            | Self::Upload { id, .. }
            | Self::Delete { id, .. }
            | Self::Move { id, .. }
            | Self::Thumbnail { id, .. } => id,
        }
    }
}

pub(crate) async fn run_media(console: &mut Console, command: MediaCommands) -> anyhow::Result<()> {
    require_catalog(console).await?;
    let product_id = command.product_id().to_string();
    if !console.open_media(&product_id) {
        anyhow::bail!("product {product_id} not found");
    }

    let (ok, action) = match &command {
        MediaCommands::List { .. } => (true, "listing media"),
        MediaCommands::Upload { paths, .. } => (console.upload_media(paths).await, "upload"),
        MediaCommands::Delete { key, .. } => (console.delete_media(key).await, "deleting media"),
        MediaCommands::Move { dragged, onto, .. } => {
            (console.move_media(dragged, onto).await, "reordering media")
        }
        MediaCommands::Thumbnail { media_id, .. } => {
            (console.set_thumbnail(media_id).await, "setting thumbnail")
        }
    };

    if let Some(product) = console.media_product() {
        print!("{}", render::media_grid(product, &console.media_items()));
    }
    finish(console, ok, action)
}
