use crate::config::{Config, OutputMode};
use crate::fetcher::Fetcher;
use crate::formatter;
use crate::parser;
use crate::renderer;
use crate::translator::Translator;
use crate::types::{Result, TranslatedEntry};
use std::sync::Arc;
use tracing::info;

/// Single-run driver: fetch -> parse -> format -> render -> write.
/// Only fetch/parse and write failures are fatal; per-field translation
/// failures were already absorbed into inline sentinels by the formatter.
pub struct Pipeline {
    config: Config,
    fetcher: Fetcher,
    translator: Arc<dyn Translator>,
}

impl Pipeline {
    pub fn new(config: Config, translator: Arc<dyn Translator>) -> Result<Self> {
        let fetcher = Fetcher::new(&config.user_agent, config.timeout_seconds)?;

        Ok(Self {
            config,
            fetcher,
            translator,
        })
    }

    pub async fn run(&self) -> Result<()> {
        let content = self.fetcher.fetch_feed(&self.config.feed_url).await?;
        let entries = parser::parse_feed(&content)?;

        let translated = formatter::translate_entries(
            entries,
            self.config.limit,
            self.translator.as_ref(),
            &self.config.target_language,
            self.config.concurrency,
        )
        .await;

        info!(
            "Formatted {} entries via {} backend",
            translated.len(),
            self.translator.name()
        );

        let page = self.render(&translated);

        tokio::fs::write(&self.config.output, &page).await?;
        info!(
            "Wrote {} bytes to {}",
            page.len(),
            self.config.output.display()
        );

        Ok(())
    }

    fn render(&self, entries: &[TranslatedEntry]) -> String {
        match self.config.mode {
            OutputMode::Page => {
                let fragments: Vec<String> =
                    entries.iter().map(renderer::render_article).collect();
                renderer::render_document(&fragments, &self.config.page_title)
            }
            OutputMode::List => renderer::render_list(entries, &self.config.page_title),
        }
    }
}
