use crate::translator::{translate_field, Translator};
use crate::types::{FeedEntry, TranslatedEntry, DATE_UNKNOWN};
use futures::stream::{self, StreamExt};
use tracing::debug;

/// Long-form calendar date, e.g. "March 15, 2024", or the sentinel when the
/// entry carries no published timestamp.
pub fn display_date(entry: &FeedEntry) -> String {
    match entry.published_at {
        Some(published) => published.format("%B %-d, %Y").to_string(),
        None => DATE_UNKNOWN.to_string(),
    }
}

/// Translate the first `limit` entries, in feed order. Title and summary of
/// an entry are translated independently; translation failures surface as
/// inline sentinels in the result, never as errors. Entries run through a
/// bounded ordered stream, so output order always matches feed order.
pub async fn translate_entries(
    entries: Vec<FeedEntry>,
    limit: usize,
    translator: &dyn Translator,
    target_language: &str,
    concurrency: usize,
) -> Vec<TranslatedEntry> {
    let concurrency = concurrency.max(1);

    stream::iter(entries.into_iter().take(limit))
        .map(|entry| async move {
            debug!("Formatting entry: {}", entry.link);

            let (translated_title, translated_summary) = futures::join!(
                translate_field(translator, &entry.title, target_language),
                translate_field(translator, &entry.summary, target_language),
            );

            let display_date = display_date(&entry);

            TranslatedEntry {
                original: entry,
                translated_title,
                translated_summary,
                display_date,
            }
        })
        .buffered(concurrency)
        .collect()
        .await
}
