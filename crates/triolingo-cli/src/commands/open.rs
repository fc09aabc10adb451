//! The `triolingo open` command.

use anyhow::{Context as _, Result};

use triolingo_core::route::Route;

use crate::context::Context;

pub async fn execute(ctx: &Context, path: &str) -> Result<()> {
    let route: Route = path
        .parse()
        .with_context(|| format!("cannot open \"{path}\""))?;
    tracing::debug!("opening {route}");

    match route {
        Route::Languages => super::languages::execute(ctx).await,
        Route::LessonSets { language } => super::lessons::execute(ctx, &language).await,
        Route::Quiz {
            language,
            lesson_set,
        } => super::quiz::execute(ctx, &language, &lesson_set).await,
    }
}
