//! RSS 2.0 document rendering: per-item fragments, channel header and
//! footer, and final assembly.
//!
//! Output is assembled as text with escaping applied at every insertion
//! point (see [`super::escape`]), because the document contract is exact
//! down to the entity set: a generic XML writer would escape apostrophes
//! and refuse split CDATA sections.

use chrono::{DateTime, Utc};
use url::Url;

use crate::config::Config;
use crate::feed::{resolve_date, FeedItem};

use super::escape::{cdata, escape_text};

/// Fixed identifying string for the channel `<generator>` element.
pub const GENERATOR: &str = concat!("json2rss ", env!("CARGO_PKG_VERSION"));

/// Formats an instant in the RFC 1123 layout RSS date elements require,
/// e.g. `Sat, 01 Jun 2024 08:30:00 GMT`.
pub fn format_rfc1123(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Renders one `<item>` fragment.
///
/// Field order is fixed: title, link, guid, pubDate, description, then an
/// optional source element when either attribution field is present.
///
/// The guid is the link, falling back to the title, falling back to the
/// build time in epoch milliseconds, and it always carries
/// `isPermaLink="true"`, even for the non-URL fallbacks. That is looser
/// than the RSS spec's reading of "permalink", but consumers of this feed
/// already treat the guid as item identity, so the shape is preserved.
pub fn render_item(item: &FeedItem, now: DateTime<Utc>) -> String {
    let title = escape_text(item.title.as_deref().unwrap_or("(untitled)"));
    let link = escape_text(item.link.as_deref().unwrap_or(""));

    let guid_source = match (&item.link, &item.title) {
        (Some(link), _) => link.clone(),
        (None, Some(title)) => title.clone(),
        (None, None) => now.timestamp_millis().to_string(),
    };
    let guid = escape_text(&guid_source);

    let pub_date = format_rfc1123(resolve_date(item.date.as_deref(), now));
    let description = cdata(item.snippet.as_deref().unwrap_or(""));

    let source = if item.source_name.is_some() || item.source_url.is_some() {
        format!(
            "\n      <source url=\"{}\">{}</source>",
            escape_text(item.source_url.as_deref().unwrap_or("")),
            escape_text(item.source_name.as_deref().unwrap_or(""))
        )
    } else {
        String::new()
    };

    format!(
        r#"    <item>
      <title>{title}</title>
      <link>{link}</link>
      <guid isPermaLink="true">{guid}</guid>
      <pubDate>{pub_date}</pubDate>
      <description>{description}</description>{source}
    </item>
"#
    )
}

fn channel_header(config: &Config, self_link: &Url, now: DateTime<Utc>) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{title}</title>
    <link>{link}</link>
    <description>{description}</description>
    <language>{language}</language>
    <generator>{generator}</generator>
    <lastBuildDate>{last_build_date}</lastBuildDate>
    <ttl>{ttl}</ttl>
    <atom:link href="{self_link}" rel="self" type="application/rss+xml" />
"#,
        title = escape_text(&config.feed_title),
        link = escape_text(&config.site_url),
        description = escape_text(&config.feed_description),
        language = escape_text(&config.feed_language),
        generator = GENERATOR,
        last_build_date = format_rfc1123(now),
        ttl = config.ttl_minutes,
        self_link = escape_text(self_link.as_str()),
    )
}

/// Assembles the complete RSS 2.0 document: channel header, item
/// fragments in their given (already sorted) order, and footer.
pub fn build_document(
    config: &Config,
    self_link: &Url,
    items: &[FeedItem],
    now: DateTime<Utc>,
) -> String {
    let mut document = channel_header(config, self_link, now);
    for item in items {
        document.push_str(&render_item(item, now));
    }
    document.push_str("  </channel>\n</rss>\n");

    tracing::debug!(items = items.len(), bytes = document.len(), "Assembled RSS document");
    document
}
