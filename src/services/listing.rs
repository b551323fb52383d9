// src/services/listing.rs

//! Directory-listing enumeration service.
//!
//! Enumerates the subdirectory entries of a release index page. The same
//! listing format is served at the target and the subtarget level, so
//! one service covers both.

use scraper::{Html, Selector};

use crate::error::Result;
use crate::utils::http::{PageFetcher, fetch_page};

/// Service for enumerating subdirectories of index pages.
pub struct DirectoryLister<'a> {
    fetcher: &'a dyn PageFetcher,
}

impl<'a> DirectoryLister<'a> {
    /// Create a new lister over the given fetcher.
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch an index page and list its subdirectory entries in page order.
    pub async fn list(&self, url: &str) -> Result<Vec<String>> {
        let document = fetch_page(self.fetcher, url).await?;
        Ok(subdirectories(&document))
    }
}

/// Extract subdirectory names from a parsed directory index.
///
/// The download site renders one table row per entry with the name cell
/// marked `class="n"`. Directory entries link with a trailing slash,
/// which is stripped; file rows, anchors without an href, and the
/// parent-directory link are skipped.
pub fn subdirectories(document: &Html) -> Vec<String> {
    let link_selector = Selector::parse("table tr td.n a").unwrap();

    document
        .select(&link_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.ends_with('/') && *href != "../" && *href != "./")
        .map(|href| href[..href.len() - 1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body><table>
          <tr><td class="n"><a href="../">Parent directory</a></td></tr>
          <tr><td class="n"><a href="ath79/">ath79/</a></td><td class="s">-</td></tr>
          <tr><td class="n"><a href="bcm27xx/">bcm27xx/</a></td><td class="s">-</td></tr>
          <tr><td class="n"><a href="ramips/">ramips/</a></td><td class="s">-</td></tr>
          <tr><td class="n"><a href="sha256sums">sha256sums</a></td><td class="s">21.1 KB</td></tr>
        </table></body></html>
    "#;

    #[test]
    fn test_keeps_only_directory_entries_in_order() {
        let document = Html::parse_document(LISTING);
        assert_eq!(subdirectories(&document), vec!["ath79", "bcm27xx", "ramips"]);
    }

    #[test]
    fn test_anchors_outside_name_cell_are_ignored() {
        let html = r#"
            <table>
              <tr><td><a href="elsewhere/">x</a></td></tr>
              <tr><td class="n"><a href="mt7621/">mt7621/</a></td></tr>
            </table>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(subdirectories(&document), vec!["mt7621"]);
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let html = r#"
            <table>
              <tr><td class="n"><a href="x86/">x86/</a></td></tr>
              <tr><td class="n"><a href="x86/">x86/</a></td></tr>
            </table>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(subdirectories(&document), vec!["x86", "x86"]);
    }

    #[test]
    fn test_empty_page() {
        let document = Html::parse_document("<html><body>No index here</body></html>");
        assert!(subdirectories(&document).is_empty());
    }
}
