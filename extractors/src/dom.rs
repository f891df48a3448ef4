//! Small DOM helpers over `scraper` that behave like the browser APIs the
//! heuristics were written against.

use scraper::{ElementRef, Selector};
use url::Url;

/// Concatenated text of every descendant text node, like `textContent`.
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn trimmed_text(element: ElementRef<'_>) -> String {
    text_content(element).trim().to_string()
}

/// First descendant matching `selector`, like `querySelector`. The scope
/// element itself never matches.
pub fn query_first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope
        .select(selector)
        .find(|element| element.id() != scope.id())
}

/// Every descendant matching `selector` in document order, like
/// `querySelectorAll`.
pub fn query_all<'a>(scope: ElementRef<'a>, selector: &Selector) -> Vec<ElementRef<'a>> {
    scope
        .select(selector)
        .filter(|element| element.id() != scope.id())
        .collect()
}

pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Runs a selector chain and returns the trimmed text of the first selector
/// whose first match has any text. Later matches of the same selector are
/// not consulted.
pub fn first_text(scope: ElementRef<'_>, chain: &[Selector]) -> Option<String> {
    chain.iter().find_map(|selector| {
        query_first(scope, selector)
            .map(trimmed_text)
            .filter(|text| !text.is_empty())
    })
}

/// Attribute value resolved against the page URL the way `element.href`
/// would be. Without a base the raw value is returned.
pub fn resolved_attr(element: ElementRef<'_>, attr: &str, base: Option<&Url>) -> Option<String> {
    let raw = element.value().attr(attr)?.trim();
    if raw.is_empty() {
        return None;
    }

    let resolved = base
        .and_then(|base| base.join(raw).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| raw.to_string());

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn selector(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_query_first_excludes_scope() {
        let html = Html::parse_fragment(r#"<div class="name"><span class="name">Inner</span></div>"#);
        let outer = html.select(&selector("div.name")).next().unwrap();

        let found = query_first(outer, &selector(r#"[class*="name"]"#)).unwrap();
        assert_eq!(found.value().name(), "span");
    }

    #[test]
    fn test_first_text_skips_empty_first_match() {
        let html = Html::parse_fragment(r#"<div><h3>  </h3><span class="full-name">Jane Doe</span></div>"#);
        let scope = html.select(&selector("div")).next().unwrap();

        let chain = vec![selector("h3"), selector(r#"[class*="full-name"]"#)];
        assert_eq!(first_text(scope, &chain).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_text_content_concatenates_without_separators() {
        let html = Html::parse_fragment("<p><b>Jane</b><i>Doe</i></p>");
        let p = html.select(&selector("p")).next().unwrap();
        assert_eq!(text_content(p), "JaneDoe");
    }

    #[test]
    fn test_resolved_attr() {
        let html = Html::parse_fragment(r#"<a href="/in/jane-doe">profile</a>"#);
        let link = html.select(&selector("a")).next().unwrap();
        let base = Url::parse("https://www.linkedin.com/search").unwrap();

        assert_eq!(
            resolved_attr(link, "href", Some(&base)).as_deref(),
            Some("https://www.linkedin.com/in/jane-doe")
        );
        assert_eq!(resolved_attr(link, "href", None).as_deref(), Some("/in/jane-doe"));
        assert!(resolved_attr(link, "src", None).is_none());
    }
}
