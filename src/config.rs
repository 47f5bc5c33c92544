use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_FEED_URL: &str = "https://docs.databricks.com/aws/en/feed.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// OpenAI chat completions API.
    Openai,
    /// Anthropic messages API.
    Anthropic,
    /// No translation, original text passed through unchanged.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Full HTML document with one styled block per article.
    Page,
    /// Minimal styled unordered list of article links.
    List,
}

/// Run configuration. Everything the pipeline needs is resolved here at
/// startup; API keys come from the process environment (a `.env` file is
/// loaded if present).
#[derive(Debug, Clone, Parser)]
#[command(name = "rss-translator", about = "Fetch an RSS/Atom feed, translate entries via an LLM provider, and write a static HTML page")]
pub struct Config {
    /// Feed URL to fetch
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Maximum number of entries to process
    #[arg(long, default_value_t = 5)]
    pub limit: usize,

    /// Language the titles and summaries are translated into
    #[arg(long, default_value = "Japanese")]
    pub target_language: String,

    /// Translation backend
    #[arg(long, value_enum, default_value_t = Provider::None)]
    pub provider: Provider,

    /// Override the provider's default model
    #[arg(long)]
    pub model: Option<String>,

    /// Path of the rendered HTML page
    #[arg(long, default_value = "feed.html")]
    pub output: PathBuf,

    /// Output shape
    #[arg(long, value_enum, default_value_t = OutputMode::Page)]
    pub mode: OutputMode,

    /// Title rendered at the top of the page
    #[arg(long, default_value = "Feed Updates")]
    pub page_title: String,

    /// Per-request timeout for feed and provider calls, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    /// How many entries are translated concurrently
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// User agent sent with the feed request
    #[arg(long, default_value = "rss-translator/0.1")]
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_values() {
        let config = Config::parse_from(["rss-translator"]);
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.limit, 5);
        assert_eq!(config.provider, Provider::None);
        assert_eq!(config.output, PathBuf::from("feed.html"));
    }

    #[test]
    fn cli_overrides() {
        let config = Config::parse_from([
            "rss-translator",
            "--feed-url",
            "https://example.com/feed.xml",
            "--limit",
            "3",
            "--provider",
            "anthropic",
            "--mode",
            "list",
        ]);
        assert_eq!(config.feed_url, "https://example.com/feed.xml");
        assert_eq!(config.limit, 3);
        assert_eq!(config.provider, Provider::Anthropic);
        assert_eq!(config.mode, OutputMode::List);
    }
}
