//! Parsed HTML page queried by the structural checks.

use crate::error::{CheckError, CheckResult};
use scraper::{Html, Selector};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct PageDocument {
    html: Html,
    source: Option<PathBuf>,
}

impl PageDocument {
    /// Parse `markup` as a full HTML document. Malformed markup is recovered
    /// the way browsers do it, so this never fails.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
            source: None,
        }
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let markup = fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = markup.len(), "loaded HTML document");

        let mut document = Self::parse(&markup);
        document.source = Some(path.to_path_buf());
        Ok(document)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of elements matching the CSS selector `css`.
    pub fn count(&self, css: &str) -> CheckResult<usize> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).count())
    }

    pub fn exists(&self, css: &str) -> CheckResult<bool> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).next().is_some())
    }

    /// Concatenated text of the first element matching `css`, if any.
    pub fn text_of(&self, css: &str) -> CheckResult<Option<String>> {
        let selector = selector(css)?;
        Ok(self
            .html
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>()))
    }

    pub fn title(&self) -> Option<String> {
        self.text_of("title").ok().flatten()
    }
}

fn selector(css: &str) -> CheckResult<Selector> {
    Selector::parse(css)
        .map_err(|e| CheckError::new(format!("Invalid selector '{}': {:?}", css, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>DevOps Dashboard</title>
</head>
<body>
  <header><h1>DevOps Dashboard</h1></header>
  <div class="card">Builds</div>
  <div class="card wide">Deployments</div>
  <section class="build-info"><span id="buildNumber">Build: pending</span></section>
</body>
</html>"#;

    #[test]
    fn test_queries() {
        let doc = PageDocument::parse(PAGE);
        assert_eq!(doc.title().as_deref(), Some("DevOps Dashboard"));
        assert_eq!(doc.count(".card").unwrap(), 2);
        assert!(doc.exists(".build-info").unwrap());
        assert!(doc.exists(r#"meta[name="viewport"]"#).unwrap());
        assert!(doc.exists("header h1").unwrap());
        assert!(!doc.exists("footer").unwrap());
        assert_eq!(
            doc.text_of("#buildNumber").unwrap().as_deref(),
            Some("Build: pending")
        );
        assert!(doc.source().is_none());
    }

    #[test]
    fn test_missing_title() {
        let doc = PageDocument::parse("<html><body><div class=\"card\"></div></body></html>");
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_invalid_selector_is_a_check_error() {
        let doc = PageDocument::parse(PAGE);
        let err = doc.count("div[").unwrap_err();
        assert!(err.message().starts_with("Invalid selector 'div['"));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAGE.as_bytes()).unwrap();

        let doc = PageDocument::load(file.path()).unwrap();
        assert_eq!(doc.source(), Some(file.path()));
        assert_eq!(doc.count(".card").unwrap(), 2);

        assert!(PageDocument::load(Path::new("/nonexistent/index.html")).is_err());
    }
}
