use crate::types::{FeedEntry, PipelineError, Result};
use chrono::Utc;
use feed_rs::parser;
use tracing::{debug, info};

/// Parses RSS or Atom content into feed entries, in document order.
/// A feed that parses but yields no usable entries is an error here rather
/// than an empty value handed silently to downstream stages.
pub fn parse_feed(content: &str) -> Result<Vec<FeedEntry>> {
    debug!("Parsing feed content ({} bytes)", content.len());

    let feed = parser::parse(content.as_bytes())
        .map_err(|e| PipelineError::Parse(format!("failed to parse feed: {}", e)))?;

    let entries: Vec<FeedEntry> = feed.entries.into_iter().filter_map(parse_entry).collect();

    if entries.is_empty() {
        return Err(PipelineError::Parse("feed contained no entries".to_string()));
    }

    info!("Parsed feed with {} entries", entries.len());
    Ok(entries)
}

/// Optional fields are resolved once here; entries without a link are
/// dropped because there is nothing to render them against.
fn parse_entry(entry: feed_rs::model::Entry) -> Option<FeedEntry> {
    let link = entry.links.first()?.href.clone();

    let title = entry
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "Untitled".to_string());

    let summary = entry.summary.map(|s| s.content).unwrap_or_default();

    let published_at = entry.published.map(|dt| dt.with_timezone(&Utc));

    Some(FeedEntry {
        title,
        summary,
        link,
        published_at,
    })
}
