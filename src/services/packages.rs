// src/services/packages.rs

//! Package-listing metadata extraction service.
//!
//! Derives the kernel ABI hash and the package architecture from a
//! subtarget's package index. The listing format has changed across
//! releases, so extraction runs through ordered fallback tiers and
//! tolerates all of them failing.

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::PackageMetadata;
use crate::utils::http::{PageFetcher, fetch_page};

/// Service for extracting metadata from package listing pages.
pub struct MetadataScanner<'a> {
    fetcher: &'a dyn PageFetcher,
}

impl<'a> MetadataScanner<'a> {
    /// Create a new scanner over the given fetcher.
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch a package listing and extract its metadata.
    ///
    /// A page that fails to load is an error; a page that yields no
    /// metadata is not.
    pub async fn scan(&self, url: &str) -> Result<PackageMetadata> {
        let document = fetch_page(self.fetcher, url).await?;
        Ok(extract_metadata(&document))
    }
}

/// Derive `{vermagic, pkgarch}` from a parsed package listing.
///
/// Tiers, in precedence order; a field set by an earlier tier is never
/// overwritten:
/// 1. the "Packages for architecture:" line in the page body,
/// 2. the kernel package filename (hash after `~`, optional arch suffix),
/// 3. the architecture segment of the `base` repository link.
pub fn extract_metadata(document: &Html) -> PackageMetadata {
    let mut metadata = PackageMetadata::default();

    if let Some(arch) = arch_from_page_text(document) {
        metadata.pkgarch = arch;
    }

    if let Some((vermagic, arch)) = kernel_file_signature(document) {
        metadata.vermagic = vermagic;
        if metadata.pkgarch.is_empty() {
            if let Some(arch) = arch {
                metadata.pkgarch = arch;
            }
        }
    }

    if metadata.pkgarch.is_empty() {
        if let Some(arch) = arch_from_base_repo_link(document) {
            metadata.pkgarch = arch;
        }
    }

    metadata
}

/// Tier 1: the listing header names the architecture directly.
fn arch_from_page_text(document: &Html) -> Option<String> {
    let re = Regex::new(r"(?i)Packages for architecture:\s+([A-Za-z0-9_-]+)").ok()?;
    let body_selector = Selector::parse("body").ok()?;
    let text: String = document.select(&body_selector).next()?.text().collect();
    re.captures(&text).map(|caps| caps[1].to_string())
}

/// Tier 2: kernel package filenames carry the ABI hash after a tilde,
/// e.g. `kernel-6.6.52~63b1a...-r1_aarch64_cortex-a53.apk`. The first
/// matching anchor wins; later kernel anchors do not overwrite it.
fn kernel_file_signature(document: &Html) -> Option<(String, Option<String>)> {
    let re = Regex::new(r"kernel-.*?~([a-f0-9]+)(?:-r\d+)?(?:_|-)?(.*?)\.apk$").ok()?;
    let link_selector = Selector::parse("a").ok()?;

    document
        .select(&link_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with("kernel-"))
        .find_map(|href| {
            let caps = re.captures(href)?;
            let vermagic = caps[1].to_string();
            let arch = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(String::from);
            Some((vermagic, arch))
        })
}

/// Tier 3: the cross-link to the shared package repository embeds the
/// architecture right after the `packages` path segment, e.g.
/// `../../../packages/aarch64_cortex-a53/base`.
fn arch_from_base_repo_link(document: &Html) -> Option<String> {
    let link_selector = Selector::parse("a").ok()?;
    let href = document
        .select(&link_selector)
        .find(|a| a.text().collect::<String>().contains("base"))?
        .value()
        .attr("href")?;

    let parts: Vec<&str> = href.split('/').collect();
    let index = parts.iter().position(|p| *p == "packages")?;
    parts
        .get(index + 1)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_page_text_arch_takes_precedence() {
        let document = parse(
            r#"
            <body>
              <h1>Index of /releases/23.05.3/targets/ramips/mt7621/packages/</h1>
              <p>Packages for architecture: ramips_mt7621</p>
              <a href="kernel-5.10.176~abcdef1234567890-r1_other_arch.apk">kernel</a>
            </body>
            "#,
        );
        let metadata = extract_metadata(&document);
        assert_eq!(metadata.pkgarch, "ramips_mt7621");
        assert_eq!(metadata.vermagic, "abcdef1234567890");
    }

    #[test]
    fn test_kernel_filename_fills_both_fields() {
        let document = parse(
            r#"<body><a href="kernel-5.10.176~abcdef1234567890-r1_aarch64_cortex-a53.apk">k</a></body>"#,
        );
        let metadata = extract_metadata(&document);
        assert_eq!(metadata.vermagic, "abcdef1234567890");
        assert_eq!(metadata.pkgarch, "aarch64_cortex-a53");
    }

    #[test]
    fn test_first_kernel_anchor_wins() {
        let document = parse(
            r#"
            <body>
              <a href="kernel-6.6.52~1111111111111111-r1_mipsel_24kc.apk">k1</a>
              <a href="kernel-6.6.52~2222222222222222-r1_mipsel_24kc.apk">k2</a>
            </body>
            "#,
        );
        assert_eq!(extract_metadata(&document).vermagic, "1111111111111111");
    }

    #[test]
    fn test_kernel_filename_without_arch_suffix() {
        let document = parse(r#"<body><a href="kernel-6.6.52~deadbeef00112233-r2.apk">k</a></body>"#);
        let metadata = extract_metadata(&document);
        assert_eq!(metadata.vermagic, "deadbeef00112233");
        assert_eq!(metadata.pkgarch, "");
    }

    #[test]
    fn test_base_repo_link_fallback() {
        let document = parse(
            r#"<body><a href="../../../packages/aarch64_cortex-a53/base">base</a></body>"#,
        );
        let metadata = extract_metadata(&document);
        assert_eq!(metadata.pkgarch, "aarch64_cortex-a53");
        assert_eq!(metadata.vermagic, "");
    }

    #[test]
    fn test_base_link_without_packages_segment_is_swallowed() {
        let document = parse(r#"<body><a href="../../base">base</a></body>"#);
        assert_eq!(extract_metadata(&document), PackageMetadata::default());
    }

    #[test]
    fn test_all_tiers_missing_yield_empty_fields() {
        let document = parse("<body><a href=\"somefile.apk\">file</a></body>");
        let metadata = extract_metadata(&document);
        assert_eq!(metadata.vermagic, "");
        assert_eq!(metadata.pkgarch, "");
    }
}
