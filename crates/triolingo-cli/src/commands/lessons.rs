//! The `triolingo lessons` command.

use anyhow::Result;

use triolingo_core::route::Route;

use crate::context::Context;
use crate::view;

pub async fn execute(ctx: &Context, language: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match ctx.catalog.lesson_sets(language).await {
        Ok((language, sets)) => view::lesson_sets(&mut out, &language, &sets),
        Err(e) => {
            let route = Route::LessonSets {
                language: language.to_string(),
            };
            view::load_error(&mut out, &route, e)
        }
    }
}
