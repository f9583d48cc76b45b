//! End-to-end parses compared against rendered tree snapshots.

use dom::snapshot::snapshot;
use dom::{Document, Namespace, NodeId, NodeKind};
use markup::ParseOptions;

fn parse_snapshot(input: &str) -> String {
    let mut document = Document::new();
    let root = markup::parse(&mut document, input, ParseOptions::default()).expect("parse");
    snapshot(&document, root)
}

#[test]
fn whole_document_shape() {
    let input = "<!DOCTYPE html><html><head><title>Hi</title></head>\
                 <body><p>Para</p></body></html>";
    assert_eq!(
        parse_snapshot(input),
        "#document-fragment\n\
         \x20 <!DOCTYPE html>\n\
         \x20 <html>\n\
         \x20   <head>\n\
         \x20     <title>\n\
         \x20       \"Hi\"\n\
         \x20   <body>\n\
         \x20     <p>\n\
         \x20       \"Para\"\n"
    );
}

#[test]
fn parses_into_document_node_when_requested() {
    let mut document = Document::new();
    let target = document.document_node();
    let options = ParseOptions {
        root: Some(target),
        ..ParseOptions::default()
    };
    let returned = markup::parse(&mut document, "<html></html>", options).expect("parse");
    assert_eq!(returned, target);
    assert!(
        snapshot(&document, target).starts_with("#document\n  <html>\n"),
        "got: {}",
        snapshot(&document, target)
    );
}

#[test]
fn appends_after_existing_children() {
    let mut document = Document::new();
    let host = document.create_element_ns(Namespace::Html, "div");
    let existing = document.create_element_ns(Namespace::Html, "b");
    document.append_child(host, existing).expect("append");
    let options = ParseOptions {
        root: Some(host),
        ..ParseOptions::default()
    };
    markup::parse(&mut document, "<i></i>", options).expect("parse");
    let names: Vec<_> = document
        .children(host)
        .iter()
        .map(|&c| document.tag_name(c).map(str::to_string))
        .collect();
    assert_eq!(
        names,
        vec![Some("b".to_string()), Some("i".to_string())]
    );
}

#[test]
fn surrounding_whitespace_is_text() {
    assert_eq!(
        parse_snapshot("  <b>x</b>  "),
        "#document-fragment\n  \"  \"\n  <b>\n    \"x\"\n  \"  \"\n"
    );
}

#[test]
fn end_tags_match_case_insensitively_and_allow_trailing_space() {
    assert_eq!(
        parse_snapshot("<DIV>x</div   >y</DIV>"),
        "#document-fragment\n  <DIV>\n    \"x\"\n  \"y\"\n"
    );
}

#[test]
fn textarea_content_is_opaque() {
    assert_eq!(
        parse_snapshot("<textarea><b>bold?</b></textarea>"),
        "#document-fragment\n  <textarea>\n    \"<b>bold?</b>\"\n"
    );
}

#[test]
fn raw_text_elements_carry_no_flag_unless_script_or_style() {
    let mut document = Document::new();
    let root = markup::parse(
        &mut document,
        "<title>t</title>",
        ParseOptions {
            evaluate_scripts: true,
            evaluate_css: true,
            ..ParseOptions::default()
        },
    )
    .expect("parse");
    let title = document.children(root)[0];
    let NodeKind::Element {
        evaluate_content, ..
    } = document.kind(title)
    else {
        panic!("expected element, got: {:?}", document.kind(title));
    };
    assert_eq!(*evaluate_content, None);
}

#[test]
fn options_auto_close_but_end_tags_stay_strict() {
    // The second <option> closes the first; </select> finds an open
    // <option> on top and is dropped rather than closing through it.
    assert_eq!(
        parse_snapshot("<select><option>a<option>b</select>"),
        "#document-fragment\n\
         \x20 <select>\n\
         \x20   <option>\n\
         \x20     \"a\"\n\
         \x20   <option>\n\
         \x20     \"b\"\n"
    );
}

#[test]
fn nobr_closes_across_intermediate_elements() {
    assert_eq!(
        parse_snapshot("<nobr>a<i><nobr>b"),
        "#document-fragment\n\
         \x20 <nobr>\n\
         \x20   \"a\"\n\
         \x20   <i>\n\
         \x20 <nobr>\n\
         \x20   \"b\"\n"
    );
}

#[test]
fn void_elements_never_nest() {
    assert_eq!(
        parse_snapshot("<br>a<hr>b<input type=text>c"),
        "#document-fragment\n\
         \x20 <br>\n\
         \x20 \"a\"\n\
         \x20 <hr>\n\
         \x20 \"b\"\n\
         \x20 <input>\n\
         \x20   type=\"text\"\n\
         \x20 \"c\"\n"
    );
}

#[test]
fn svg_subtree_namespaces_and_return_to_html() {
    let mut document = Document::new();
    let root = markup::parse(
        &mut document,
        "<svg><g><circle/></g></svg><span></span>",
        ParseOptions::default(),
    )
    .expect("parse");
    let children = document.children(root);
    assert_eq!(children.len(), 2);
    assert_eq!(document.namespace_of(children[0]), Namespace::Svg);
    assert_eq!(document.namespace_of(children[1]), Namespace::Html);
    let g = document.children(children[0])[0];
    let circle = document.children(g)[0];
    assert_eq!(document.namespace_of(g), Namespace::Svg);
    assert_eq!(document.namespace_of(circle), Namespace::Svg);
    assert!(document.children(circle).is_empty());
}

#[test]
fn adversarial_angle_soup_parses_as_text() {
    // `<a` opens an element; the `<b` that follows is still inside the start
    // tag, so it is consumed as attribute material and becomes a bare `b`
    // attribute. The leading angle run and the tail are plain text.
    assert_eq!(
        parse_snapshot("<><<>><a<b><<!<?"),
        "#document-fragment\n\
         \x20 \"<><<>>\"\n\
         \x20 <a>\n\
         \x20   b=\"\"\n\
         \x20   \"<<!<?\"\n"
    );
}

/// Minimal renderer for round-trip checks: elements and text only, which is
/// all the balanced entity-free inputs below produce.
fn render_markup(document: &Document, node: NodeId, out: &mut String) {
    match document.kind(node) {
        NodeKind::Element { name, .. } => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            for &child in document.children(node) {
                render_markup(document, child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        NodeKind::Text { text } => out.push_str(text),
        _ => {
            for &child in document.children(node) {
                render_markup(document, child, out);
            }
        }
    }
}

#[test]
fn reparsing_rendered_output_is_structurally_idempotent() {
    for input in [
        "<div><span>one</span><span>two</span></div>",
        "plain<b>bold</b>tail",
        "<section><article><h1>t</h1><p>body</p></article></section>",
    ] {
        let mut first = Document::new();
        let first_root =
            markup::parse(&mut first, input, ParseOptions::default()).expect("parse");
        let mut rendered = String::new();
        render_markup(&first, first_root, &mut rendered);

        let mut second = Document::new();
        let second_root =
            markup::parse(&mut second, &rendered, ParseOptions::default()).expect("reparse");
        assert_eq!(
            snapshot(&first, first_root),
            snapshot(&second, second_root),
            "input: {input}, rendered: {rendered}"
        );
    }
}

#[test]
fn deeply_nested_input_builds_linear_chain() {
    let depth = 2_000;
    let mut input = String::new();
    for _ in 0..depth {
        input.push_str("<div>");
    }
    let mut document = Document::new();
    let root = markup::parse(&mut document, &input, ParseOptions::default()).expect("parse");
    let mut cursor = root;
    let mut seen = 0;
    while let Some(&child) = document.children(cursor).first() {
        seen += 1;
        cursor = child;
    }
    assert_eq!(seen, depth);
}
