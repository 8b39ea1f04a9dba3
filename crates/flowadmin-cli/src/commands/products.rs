use std::path::PathBuf;

use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::product_file::ProductFile;
use super::{finish, require_catalog};
use crate::console::Console;
use crate::notify::Toast;
use crate::render;
use crate::search::{debounce, SEARCH_DEBOUNCE};

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// Show the product table
    List {
        /// Case-insensitive filter over name, slug, and flavours
        #[arg(long)]
        search: Option<String>,
        /// Print the HTML table body instead of text
        #[arg(long)]
        html: bool,
    },
    /// Filter interactively: one query per line on stdin
    Search,
    /// Create a product from a YAML form file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Edit a product
    Edit {
        id: String,
        /// YAML form file with the fields to change
        #[arg(long)]
        file: Option<PathBuf>,
        /// Remove the pack-size row at this position (0-based, repeatable)
        #[arg(long = "remove-pack-size")]
        remove_pack_size: Vec<usize>,
    },
    /// Delete a product
    Delete { id: String },
}

pub(crate) async fn run_products(
    console: &mut Console,
    command: ProductsCommands,
) -> anyhow::Result<()> {
    require_catalog(console).await?;

    match command {
        ProductsCommands::List { search, html } => {
            let products = console
                .state
                .catalog
                .search(search.as_deref().unwrap_or_default());
            if html {
                println!("{}", render::products_table_html(&products));
            } else {
                print!("{}", render::products_table_text(&products));
            }
            Ok(())
        }
        ProductsCommands::Search => {
            run_search(console).await;
            Ok(())
        }
        ProductsCommands::Create { file } => {
            let file = ProductFile::read(&file)?;
            console.open_create();
            apply_file(console, &file)?;
            let ok = console.submit_product().await;
            finish(console, ok, "saving product")
        }
        ProductsCommands::Edit {
            id,
            file,
            mut remove_pack_size,
        } => {
            let file = file.as_deref().map(ProductFile::read).transpose()?;
            if !console.open_edit(&id) {
                anyhow::bail!("product {id} not found");
            }
            if let Some(file) = &file {
                apply_file(console, file)?;
            }
            // Highest index first so earlier removals do not shift later ones.
            remove_pack_size.sort_unstable_by(|a, b| b.cmp(a));
            remove_pack_size.dedup();
            for index in remove_pack_size {
                if !console.remove_pack_size_row(index) {
                    anyhow::bail!("could not remove pack size row {index}");
                }
            }
            let ok = console.submit_product().await;
            finish(console, ok, "saving product")
        }
        ProductsCommands::Delete { id } => {
            let ok = console.delete_product(&id).await;
            finish(console, ok, "deleting product")
        }
    }
}

fn apply_file(console: &mut Console, file: &ProductFile) -> anyhow::Result<()> {
    let Some(editor) = console.editor_mut() else {
        anyhow::bail!("product editor is not open");
    };
    if let Err(e) = file.apply(editor) {
        console.toast(Toast::error(e.to_string()));
        anyhow::bail!("invalid product file: {e}");
    }
    Ok(())
}

/// Reads queries from stdin and prints the filtered table for the last
/// query of each burst.
async fn run_search(console: &Console) {
    let lines = BufReader::new(tokio::io::stdin()).lines();
    let queries = futures::stream::unfold(lines, |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Some((line, lines)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "stopped reading search input");
                None
            }
        }
    });

    debounce(Box::pin(queries), SEARCH_DEBOUNCE, |query| {
        let products = console.state.catalog.search(&query);
        println!("-- {} match(es) for {query:?}", products.len());
        print!("{}", render::products_table_text(&products));
    })
    .await;
}
