//! Small text/attribute helpers shared by the post and channel parsers.

use scraper::ElementRef;

use super::classes;

/// All descendant text nodes concatenated, as the markup stores them.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect()
}

/// Descendant text nodes joined with a separator. Used for the plain-text
/// body rendering (newline separator) and for header fields (space).
pub(crate) fn element_text_separated(element: &ElementRef, separator: &str) -> String {
    element.text().collect::<Vec<_>>().join(separator)
}

/// Image URLs embedded in the element's inline style as `url('...')`
/// tokens, in source order.
pub(crate) fn style_image_urls(element: &ElementRef) -> Vec<String> {
    let Some(style) = element.value().attr("style") else {
        return Vec::new();
    };
    classes::STYLE_IMAGE_URL
        .captures_iter(style)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Whether the element's direct parent carries any of the given classes.
pub(crate) fn parent_has_class(element: &ElementRef, names: &[&str]) -> bool {
    element
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|parent| parent.value().attr("class"))
        .map(|class| class.split_whitespace().any(|c| names.contains(&c)))
        .unwrap_or(false)
}
