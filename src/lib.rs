//! json2rss converts a JSON array of syndicated blog-post records into an
//! RSS 2.0 XML document.
//!
//! The pipeline is a single synchronous pass:
//!
//! 1. [`feed::load_items`] - parse the JSON input into immutable records
//! 2. [`feed::sort_and_truncate`] - newest first, capped at the limit
//! 3. [`rss::build_document`] - escape-correct RSS 2.0 serialization
//! 4. [`util::atomic_write`] - atomic write to the output path
//!
//! The JSON input shape (camelCase `title`/`link`/`date`/`snippet`/
//! `sourceName`/`sourceUrl` records) is shared with the site's browser
//! renderer, which pages the same file into a card list.
//!
//! Everything is driven by one immutable [`config::Config`]; [`run`]
//! executes the whole pipeline against it.

use anyhow::{Context, Result};
use chrono::Utc;

pub mod config;
pub mod feed;
pub mod rss;
pub mod util;

use config::Config;

/// Runs the whole pipeline: load, order, serialize, write.
///
/// The processing time is captured once here and threaded through every
/// stage, so date fallbacks and the build timestamp agree within a run.
/// Any error aborts before the output file is touched.
pub fn run(config: &Config) -> Result<()> {
    let build_time = Utc::now();

    let self_link = config.self_link()?;

    let items = feed::load_items(&config.input).with_context(|| {
        format!("Failed to load feed data from '{}'", config.input.display())
    })?;
    let total = items.len();

    let items = feed::sort_and_truncate(items, config.max_items, build_time);
    if items.len() < total {
        tracing::debug!(
            kept = items.len(),
            dropped = total - items.len(),
            "Truncated feed to item limit"
        );
    }

    let document = rss::build_document(config, &self_link, &items, build_time);

    util::atomic_write(&config.output, document.as_bytes())?;
    tracing::info!(
        path = %config.output.display(),
        items = items.len(),
        "Feed written"
    );

    Ok(())
}
