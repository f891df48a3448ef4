use crate::dom::{parent_element, query_all, query_first};
use crate::selectors::CompiledSelectors;
use scraper::{ElementRef, Html};

/// Walks from `trigger` up through its ancestors and returns the first
/// element containing a profile marker (heading, name, email link or
/// company). The walk stops at `<body>`; when nothing matches, the trigger's
/// parent is returned, or the trigger itself if it has no parent element.
pub fn locate_profile<'a>(trigger: ElementRef<'a>, selectors: &CompiledSelectors) -> ElementRef<'a> {
    let mut current = Some(trigger);

    while let Some(element) = current {
        if element.value().name() == "body" {
            break;
        }
        if query_first(element, &selectors.profile_markers).is_some() {
            return element;
        }
        current = parent_element(element);
    }

    parent_element(trigger).unwrap_or(trigger)
}

/// Every trigger element in the document, in document order.
pub fn find_triggers<'a>(document: &'a Html, selectors: &CompiledSelectors) -> Vec<ElementRef<'a>> {
    document.select(&selectors.trigger).collect()
}

/// Triggers that have not received an import button yet. A button inside
/// the trigger or anywhere in its parent container counts.
pub fn pending_triggers<'a>(
    document: &'a Html,
    selectors: &CompiledSelectors,
) -> Vec<ElementRef<'a>> {
    find_triggers(document, selectors)
        .into_iter()
        .filter(|trigger| !has_import_button(*trigger, selectors))
        .collect()
}

fn has_import_button(trigger: ElementRef<'_>, selectors: &CompiledSelectors) -> bool {
    if query_first(trigger, &selectors.import_button).is_some() {
        return true;
    }
    parent_element(trigger)
        .map(|parent| query_first(parent, &selectors.import_button).is_some())
        .unwrap_or(false)
}

/// Whether a fragment of newly added markup contains anything that looks
/// like a profile card.
pub fn contains_profile_markup(fragment: &str, selectors: &CompiledSelectors) -> bool {
    let parsed = Html::parse_fragment(fragment);
    let root = parsed.root_element();
    !query_all(root, &selectors.change_markers).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SelectorConfig;
    use scraper::Selector;

    fn selectors() -> CompiledSelectors {
        CompiledSelectors::compile(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn test_returns_matching_ancestor() {
        let html = Html::parse_document(
            r#"<html><body>
                <section id="list">
                    <div id="card">
                        <div class="person-name">Jane Doe</div>
                        <div id="actions">
                            <div data-testid="ai-personalizer-button"><button>AI</button></div>
                        </div>
                    </div>
                </section>
            </body></html>"#,
        );
        let selectors = selectors();
        let trigger = find_triggers(&html, &selectors)[0];

        let profile = locate_profile(trigger, &selectors);
        assert_eq!(profile.value().id(), Some("card"));
    }

    #[test]
    fn test_trigger_itself_can_be_the_profile() {
        let html = Html::parse_document(
            r#"<html><body><div id="wrap"><div data-testid="ai-personalizer-button"><h4>Jane</h4></div></div></body></html>"#,
        );
        let selectors = selectors();
        let trigger = find_triggers(&html, &selectors)[0];

        let profile = locate_profile(trigger, &selectors);
        assert_eq!(profile.value().attr("data-testid"), Some("ai-personalizer-button"));
    }

    #[test]
    fn test_falls_back_to_parent() {
        let html = Html::parse_document(
            r#"<html><body><div id="wrap"><div data-testid="ai-personalizer-button"><button>AI</button></div></div></body></html>"#,
        );
        let selectors = selectors();
        let trigger = find_triggers(&html, &selectors)[0];

        let profile = locate_profile(trigger, &selectors);
        assert_eq!(profile.value().id(), Some("wrap"));
    }

    #[test]
    fn test_pending_triggers_skip_processed() {
        let html = Html::parse_document(
            r#"<html><body>
                <div class="card"><div data-testid="ai-personalizer-button" id="a"></div></div>
                <div class="card"><div data-testid="ai-personalizer-button" id="b"><button class="contactout-import-btn">Import</button></div></div>
            </body></html>"#,
        );
        let selectors = selectors();

        let pending = pending_triggers(&html, &selectors);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].value().id(), Some("a"));
        assert_eq!(find_triggers(&html, &selectors).len(), 2);
    }

    #[test]
    fn test_button_beside_trigger_counts_as_processed() {
        let html = Html::parse_document(
            r#"<html><body>
                <div class="card">
                    <div data-testid="ai-personalizer-button" id="a"></div>
                    <button class="contactout-import-btn">Import</button>
                </div>
                <div class="card"><div data-testid="ai-personalizer-button" id="b"></div></div>
            </body></html>"#,
        );

        let pending = pending_triggers(&html, &selectors());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].value().id(), Some("b"));
    }

    #[test]
    fn test_contains_profile_markup() {
        let selectors = selectors();
        assert!(contains_profile_markup(
            r#"<li><div class="profile-card">x</div></li>"#,
            &selectors
        ));
        assert!(!contains_profile_markup(r#"<li><span>x</span></li>"#, &selectors));
    }

    #[test]
    fn test_selector_helper_sanity() {
        // The locator relies on descendant-only matching.
        let html = Html::parse_fragment(r#"<h3 id="solo">Name</h3>"#);
        let h3 = html.select(&Selector::parse("h3").unwrap()).next().unwrap();
        assert!(query_first(h3, &selectors().profile_markers).is_none());
    }
}
