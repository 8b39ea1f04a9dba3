//! Command handlers. Each one runs the auth gate, drives a console
//! workflow, and prints the resulting view to stdout. Toasts go to stderr.

mod media;
mod product_file;
mod products;
mod reviews;

pub use media::MediaCommands;
pub(crate) use media::run_media;
pub use products::ProductsCommands;
pub(crate) use products::run_products;
pub use reviews::ReviewsCommands;
pub(crate) use reviews::run_reviews;

use crate::console::{Console, Route};
use crate::render;

const SIGN_IN_HINT: &str = "not signed in; run `flowadmin login --token <TOKEN>`";

async fn require_session(console: &mut Console) -> anyhow::Result<()> {
    if console.boot().await {
        Ok(())
    } else {
        anyhow::bail!(SIGN_IN_HINT)
    }
}

async fn require_catalog(console: &mut Console) -> anyhow::Result<()> {
    require_session(console).await?;
    let loaded = console.load_products().await;
    finish(console, loaded, "loading products")
}

/// Maps a workflow's success flag to the process result. The toast already
/// told the operator what went wrong.
fn finish(console: &Console, ok: bool, action: &str) -> anyhow::Result<()> {
    if ok {
        Ok(())
    } else if console.state.route == Route::Login {
        anyhow::bail!(SIGN_IN_HINT)
    } else {
        anyhow::bail!("{action} failed")
    }
}

pub(crate) async fn run_login(console: &mut Console, token: &str) -> anyhow::Result<()> {
    let ok = console.login(token).await;
    finish(console, ok, "login")?;
    if let Some(admin) = &console.state.admin {
        print!("{}", render::user_info(admin));
    }
    Ok(())
}

pub(crate) async fn run_whoami(console: &mut Console) -> anyhow::Result<()> {
    require_session(console).await?;
    if let Some(admin) = &console.state.admin {
        print!("{}", render::user_info(admin));
    }
    Ok(())
}

pub(crate) async fn run_stats(console: &mut Console) -> anyhow::Result<()> {
    require_catalog(console).await?;
    print!("{}", render::stats(&console.state.catalog.stats()));
    Ok(())
}

pub(crate) async fn run_seed(console: &mut Console) -> anyhow::Result<()> {
    require_session(console).await?;
    let ok = console.seed().await;
    finish(console, ok, "seeding")?;
    print!("{}", render::stats(&console.state.catalog.stats()));
    Ok(())
}
