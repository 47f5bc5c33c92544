use crate::types::TranslatedEntry;
use html_escape::{encode_double_quoted_attribute, encode_text};

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; max-width: 720px; margin: 0 auto; padding: 10px; }
.article { border-bottom: 1px solid #eaeaea; padding: 16px 0; }
.article h2 { margin: 0 0 4px 0; }
.article h3 { margin: 0 0 8px 0; font-weight: normal; color: #333; }
.date { color: #666; font-size: 0.85em; }
.summary { margin: 6px 0; }
a { color: #0070f3; text-decoration: none; }
a:hover { text-decoration: underline; }";

const LIST_STYLE: &str = "\
body { font-family: sans-serif; padding: 10px; }
ul { list-style-type: none; padding: 0; }
li { margin-bottom: 10px; }
a { color: #0070f3; text-decoration: none; }
a:hover { text-decoration: underline; }";

/// One self-contained fragment per article. All feed-sourced text is
/// escaped, including the link in attribute position.
pub fn render_article(entry: &TranslatedEntry) -> String {
    let link = encode_double_quoted_attribute(&entry.original.link);
    let title = encode_text(&entry.original.title);
    let translated_title = encode_text(&entry.translated_title);
    let date = encode_text(&entry.display_date);
    let summary = encode_text(&entry.original.summary);
    let translated_summary = encode_text(&entry.translated_summary);

    format!(
        r#"<div class="article">
  <h2><a href="{link}" target="_blank">{title}</a></h2>
  <h3>{translated_title}</h3>
  <p class="date">{date}</p>
  <p class="summary">{summary}</p>
  <p class="summary">{translated_summary}</p>
</div>"#
    )
}

/// Full HTML document shell around the article fragments. Deterministic:
/// nothing beyond the inputs is embedded.
pub fn render_document(fragments: &[String], page_title: &str) -> String {
    let title = encode_text(page_title);

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{PAGE_STYLE}\n</style>\n</head>\n<body>\n<h1>{title}</h1>\n{}\n</body>\n</html>\n",
        fragments.join("\n")
    )
}

/// Minimal styled unordered list of article links.
pub fn render_list(entries: &[TranslatedEntry], page_title: &str) -> String {
    let title = encode_text(page_title);

    let items: String = entries
        .iter()
        .map(|entry| {
            format!(
                "<li><a href=\"{}\" target=\"_blank\">{}</a></li>\n",
                encode_double_quoted_attribute(&entry.original.link),
                encode_text(&entry.original.title)
            )
        })
        .collect();

    format!("<style>\n{LIST_STYLE}\n</style>\n<h2>{title}</h2>\n<ul>\n{items}</ul>\n")
}
