//! Markdown-like rendering of a message body. Mirrors the plain/html text
//! walks in `base.rs` but keeps inline markup as markdown conventions.

use scraper::node::Node;
use scraper::ElementRef;

/// Renders the element's children as markdown-like text.
pub(crate) fn render(element: &ElementRef) -> String {
    render_children(element, false).trim().to_string()
}

fn render_children(element: &ElementRef, preformatted: bool) -> String {
    let mut output = String::with_capacity(128);
    for node in element.children() {
        match node.value() {
            Node::Text(text) => output.push_str(text),
            Node::Element(el) => {
                let Some(child) = ElementRef::wrap(node) else {
                    continue;
                };
                match el.name() {
                    "br" => output.push('\n'),
                    "b" | "strong" => wrap(&mut output, &child, "**", preformatted),
                    "i" | "em" => wrap(&mut output, &child, "*", preformatted),
                    "s" | "del" | "strike" => wrap(&mut output, &child, "~~", preformatted),
                    "code" if !preformatted => wrap(&mut output, &child, "`", preformatted),
                    "pre" => {
                        if !output.is_empty() && !output.ends_with('\n') {
                            output.push('\n');
                        }
                        output.push_str("```\n");
                        output.push_str(render_children(&child, true).trim_end());
                        output.push_str("\n```\n");
                    }
                    "a" => {
                        let inner = render_children(&child, preformatted);
                        match el.attr("href") {
                            Some(href) => {
                                output.push('[');
                                output.push_str(&inner);
                                output.push_str("](");
                                output.push_str(href);
                                output.push(')');
                            }
                            None => output.push_str(&inner),
                        }
                    }
                    _ => output.push_str(&render_children(&child, preformatted)),
                }
            }
            _ => {}
        }
    }
    output
}

fn wrap(output: &mut String, child: &ElementRef, marker: &str, preformatted: bool) {
    let inner = render_children(child, preformatted);
    if inner.is_empty() {
        return;
    }
    output.push_str(marker);
    output.push_str(&inner);
    output.push_str(marker);
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn render_fragment(html: &str) -> String {
        let document = Html::parse_document(&format!("<div id=\"m\">{html}</div>"));
        let selector = Selector::parse("#m").unwrap();
        let element = document.select(&selector).next().unwrap();
        render(&element)
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(render_fragment("say <b>it</b> loud"), "say **it** loud");
        assert_eq!(render_fragment("<i>quietly</i>"), "*quietly*");
        assert_eq!(render_fragment("was <s>wrong</s> right"), "was ~~wrong~~ right");
        assert_eq!(render_fragment("run <code>cargo build</code>"), "run `cargo build`");
    }

    #[test]
    fn test_links_and_breaks() {
        assert_eq!(
            render_fragment("see <a href=\"https://example.com/x\">this</a><br>done"),
            "see [this](https://example.com/x)\ndone"
        );
    }

    #[test]
    fn test_pre_block() {
        assert_eq!(
            render_fragment("before<pre>let x = 1;</pre>"),
            "before\n```\nlet x = 1;\n```"
        );
    }
}
