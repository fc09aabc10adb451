//! The `triolingo languages` command.

use anyhow::Result;

use triolingo_core::route::Route;

use crate::context::Context;
use crate::view;

pub async fn execute(ctx: &Context) -> Result<()> {
    let mut out = std::io::stdout().lock();
    let languages = match ctx.catalog.languages().await {
        Ok(languages) => languages,
        Err(e) => return view::load_error(&mut out, &Route::Languages, e),
    };
    let scores = ctx.open_scores()?;
    view::languages(&mut out, &languages, &scores)
}
