//! Structural assertions against the dashboard page.

use checks::{ensure, CheckResult, PageDocument};

pub const HEADER_SELECTOR: &str = "header, h1";
pub const CARD_SELECTOR: &str = ".card";
pub const BUILD_INFO_SELECTOR: &str = ".build-info";
pub const VIEWPORT_SELECTOR: &str = r#"meta[name="viewport"]"#;
pub const BUILD_NUMBER_SELECTOR: &str = "#buildNumber";

pub fn check_title(document: &PageDocument, keyword: &str) -> CheckResult {
    let matches = document
        .title()
        .is_some_and(|title| title.contains(keyword));
    ensure(matches, "Title element not found or incorrect")
}

/// The page needs a `<header>` element or an `<h1>` heading.
pub fn check_header(document: &PageDocument) -> CheckResult {
    ensure(document.exists(HEADER_SELECTOR)?, "Header element not found")
}

pub fn check_cards(document: &PageDocument, min_cards: usize) -> CheckResult {
    let cards = document.count(CARD_SELECTOR)?;
    ensure(
        cards >= min_cards,
        format!("Expected at least {} dashboard cards", min_cards),
    )
}

pub fn check_build_info(document: &PageDocument) -> CheckResult {
    ensure(
        document.exists(BUILD_INFO_SELECTOR)?,
        "Build info section not found",
    )
}

pub fn check_viewport(document: &PageDocument) -> CheckResult {
    ensure(
        document.exists(VIEWPORT_SELECTOR)?,
        "Viewport meta tag not found",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(head: &str, body: &str) -> PageDocument {
        PageDocument::parse(&format!(
            "<!DOCTYPE html><html><head>{}</head><body>{}</body></html>",
            head, body
        ))
    }

    #[test]
    fn test_title_must_contain_keyword() {
        let doc = page("<title>DevOps Dashboard</title>", "");
        assert!(check_title(&doc, "DevOps").is_ok());

        let doc = page("<title>Team Dashboard</title>", "");
        let err = check_title(&doc, "DevOps").unwrap_err();
        assert_eq!(err.message(), "Title element not found or incorrect");
    }

    #[test]
    fn test_missing_title() {
        let doc = page("", "<h1>DevOps</h1>");
        let err = check_title(&doc, "DevOps").unwrap_err();
        assert_eq!(err.message(), "Title element not found or incorrect");
    }

    #[test]
    fn test_header_or_heading_is_enough() {
        let doc = page("", "<header><h1>DevOps</h1></header>");
        assert!(check_header(&doc).is_ok());

        let doc = page("", "<main><h1>DevOps</h1></main>");
        assert!(check_header(&doc).is_ok());

        let doc = page("", "<header><nav>Home</nav></header>");
        assert!(check_header(&doc).is_ok());
    }

    #[test]
    fn test_missing_header() {
        let doc = page("<title>DevOps</title>", r#"<div class="card"></div>"#);
        let err = check_header(&doc).unwrap_err();
        assert_eq!(err.message(), "Header element not found");
    }

    #[test]
    fn test_exactly_three_cards_pass() {
        let doc = page(
            "",
            r#"<div class="card"></div><div class="card"></div><div class="card"></div>"#,
        );
        assert!(check_cards(&doc, 3).is_ok());
    }

    #[test]
    fn test_two_cards_fail() {
        let doc = page("", r#"<div class="card"></div><div class="card"></div>"#);
        let err = check_cards(&doc, 3).unwrap_err();
        assert_eq!(err.message(), "Expected at least 3 dashboard cards");
    }

    #[test]
    fn test_build_info_and_viewport() {
        let doc = page(
            r#"<meta name="viewport" content="width=device-width">"#,
            r#"<div class="build-info"></div>"#,
        );
        assert!(check_build_info(&doc).is_ok());
        assert!(check_viewport(&doc).is_ok());

        let bare = page("", "");
        assert_eq!(
            check_build_info(&bare).unwrap_err().message(),
            "Build info section not found"
        );
        assert_eq!(
            check_viewport(&bare).unwrap_err().message(),
            "Viewport meta tag not found"
        );
    }
}
