//! Plain-text extraction from motion HTML bodies.

use scraper::{Html, Node};

const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Extract the visible text of an HTML document.
///
/// `<script>` and `<style>` subtrees are dropped. The remaining text is split
/// into lines, every line is stripped and split again on double spaces (the
/// usual remnant of a collapsed paragraph break), and the non-empty chunks are
/// joined with single spaces. Broken markup is parsed leniently and never fails.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::with_capacity(html.len());
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            raw.push_str(text);
        }
    }

    join_chunks(&raw)
}

fn join_chunks(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
