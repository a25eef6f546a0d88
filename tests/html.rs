use motion_prep::text::html::extract_text;

#[test]
fn extracts_body_text() {
    assert_eq!(
        extract_text("<html><body>Sample HTML</body></html>"),
        "Sample HTML"
    );
}

#[test]
fn drops_script_and_style() {
    let html = "<html><head><style>p { color: red; }</style>\
                <script>var x = 1;</script></head>\
                <body><p>Motion text</p><script>track();</script></body></html>";
    assert_eq!(extract_text(html), "Motion text");
}

#[test]
fn joins_lines_and_double_space_chunks() {
    let html = "<div>\n   Rad ett\n\n   Rad två   \n<p>Del ett  del två</p></div>";
    assert_eq!(extract_text(html), "Rad ett Rad två Del ett del två");
}

#[test]
fn tolerates_broken_markup_and_decodes_entities() {
    assert_eq!(extract_text("<p>Unclosed <b>bold"), "Unclosed bold");
    assert_eq!(extract_text("<p>A &amp; B</p>"), "A & B");
    assert_eq!(extract_text(""), "");
}
