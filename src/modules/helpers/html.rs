use scraper::{ElementRef, Selector};

use crate::errors::{CustomResult, InvalidSelectorSnafu};

/// compile a css selector
pub fn selector(css: &str) -> CustomResult<Selector> {
    Selector::parse(css).map_err(|error| {
        InvalidSelectorSnafu {
            selector: css,
            reason: error.to_string(),
        }
        .build()
    })
}

/// all text below an element, trimmed
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// text of the first element below `parent` that matches `selector`, empty when there is none
pub fn first_text(parent: &ElementRef, selector: &Selector) -> String {
    parent
        .select(selector)
        .next()
        .map(|element| element_text(&element))
        .unwrap_or_default()
}
