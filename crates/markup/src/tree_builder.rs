//! Tree builder: drives the scanner and mutates the caller's tree.
//!
//! State machine over three read states. All stacks and cursors are local to
//! one `parse` call; the only shared surface is the `Document` arena itself.
//!
//! Invariants:
//! - `open_elements` and `open_names` are mutated together and always have
//!   equal length; `open_names` holds uppercased tag names for comparisons.
//! - Every element on the stack is already linked under the element beneath
//!   it (or the root).
//! - `start_tag_index >= last_index` at all times; the interval between them
//!   is empty or attribute material.
//!
//! Malformed markup never errors; only arena refusals propagate.

use crate::attributes::scan_attributes;
use crate::doctype::parse_doctype;
use crate::scanner::{Scanner, TokenKind, TokenMatch};
use dom::{
    ContentModel, Document, DomError, Namespace, NodeId, content_model, decode_attribute_value,
    decode_text,
};

const LOG_TARGET: &str = "markup.tree_builder";

/// Parse configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// Node to append into. `None` parses into a freshly created fragment.
    pub root: Option<NodeId>,
    /// Recorded on script elements when they close; never acted on here.
    pub evaluate_scripts: bool,
    /// Recorded on style elements when they close; never acted on here.
    pub evaluate_css: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReadState {
    BetweenTags,
    InsideStartTag,
    RawTextContent,
}

pub(crate) struct TreeBuilder<'d, 'i> {
    document: &'d mut Document,
    input: &'i str,
    root: NodeId,
    open_elements: Vec<NodeId>,
    open_names: Vec<String>,
    state: ReadState,
    /// Offset just past the last consumed structural token.
    last_index: usize,
    /// Offset where the current start tag's attribute region begins; doubles
    /// as the raw-text start offset once the tag resolves.
    start_tag_index: usize,
    evaluate_scripts: bool,
    evaluate_css: bool,
}

impl<'d, 'i> TreeBuilder<'d, 'i> {
    pub(crate) fn new(
        document: &'d mut Document,
        input: &'i str,
        root: NodeId,
        options: &ParseOptions,
    ) -> Self {
        Self {
            document,
            input,
            root,
            open_elements: Vec::new(),
            open_names: Vec::new(),
            state: ReadState::BetweenTags,
            last_index: 0,
            start_tag_index: 0,
            evaluate_scripts: options.evaluate_scripts,
            evaluate_css: options.evaluate_css,
        }
    }

    pub(crate) fn run(mut self) -> Result<NodeId, DomError> {
        let mut scanner = Scanner::new(self.input);
        while let Some(token) = scanner.next_token() {
            match self.state {
                ReadState::BetweenTags => self.between_tags(token)?,
                ReadState::InsideStartTag => self.inside_start_tag(token)?,
                ReadState::RawTextContent => self.raw_text_content(token)?,
            }
            debug_assert!(self.start_tag_index >= self.last_index);
            debug_assert_eq!(self.open_elements.len(), self.open_names.len());
        }
        self.finish()?;
        Ok(self.root)
    }

    fn between_tags(&mut self, token: TokenMatch<'i>) -> Result<(), DomError> {
        match token.kind {
            TokenKind::StartTagOpen(name) => {
                self.flush_text(token.start)?;
                self.open_element(name)?;
                self.state = ReadState::InsideStartTag;
                self.start_tag_index = token.end;
                self.last_index = token.end;
            }
            TokenKind::EndTag(name) => {
                self.flush_text(token.start)?;
                if self
                    .open_names
                    .last()
                    .is_some_and(|top| top.eq_ignore_ascii_case(name))
                {
                    self.pop_element();
                } else {
                    // No matching open element: tolerated, dropped.
                    log::trace!(target: LOG_TARGET, "ignoring unmatched end tag </{name}>");
                }
                self.last_index = token.end;
                self.start_tag_index = token.end;
            }
            TokenKind::Comment(body) | TokenKind::BareComment(body) => {
                self.flush_text(token.start)?;
                self.append_comment(&decode_text(body))?;
                self.last_index = token.end;
                self.start_tag_index = token.end;
            }
            TokenKind::Declaration(body) => {
                self.flush_text(token.start)?;
                match parse_doctype(body) {
                    Some(declaration) => {
                        let node = self.document.create_document_type(
                            &declaration.name,
                            &declaration.public_id,
                            &declaration.system_id,
                        );
                        let parent = self.current();
                        self.document.append_child(parent, node)?;
                    }
                    None => {
                        // Unrecognized declaration: keep it, as a comment.
                        self.append_comment(&decode_text(&format!("!{body}")))?;
                    }
                }
                self.last_index = token.end;
                self.start_tag_index = token.end;
            }
            TokenKind::ProcessingInstruction(body) => {
                self.flush_text(token.start)?;
                if self.current_namespace() == Namespace::Html {
                    // HTML has no processing instructions; fold into a comment.
                    self.append_comment(&decode_text(&format!("?{body}")))?;
                } else {
                    log::trace!(target: LOG_TARGET, "dropping processing instruction outside html namespace");
                }
                self.last_index = token.end;
                self.start_tag_index = token.end;
            }
            TokenKind::SelfClose | TokenKind::TagClose => {
                // Unmatched residue between tags: the marker bytes stay in
                // the running text and get flushed with it.
            }
        }
        Ok(())
    }

    fn inside_start_tag(&mut self, token: TokenMatch<'i>) -> Result<(), DomError> {
        let self_closing = match token.kind {
            TokenKind::SelfClose => true,
            TokenKind::TagClose => false,
            // Anything else inside a start tag is attribute material.
            _ => return Ok(()),
        };

        let span = &self.input[self.start_tag_index..token.start];
        let scan = scan_attributes(span);
        let element = self.current();
        let element_namespace = self.document.namespace_of(element);
        for attribute in &scan.attributes {
            let value = attribute.value.map(decode_attribute_value).unwrap_or_default();
            // An `xmlns` declaration on a foreign-content element targets the
            // reserved xmlns namespace, not the element's own.
            let namespace = if element_namespace == Namespace::Svg && attribute.name == "xmlns" {
                Some(Namespace::Xmlns)
            } else {
                None
            };
            self.document
                .set_attribute_ns(element, namespace, attribute.name, &value)?;
        }
        self.start_tag_index += scan.consumed;

        if !scan.complete {
            // The marker sat inside an unterminated quoted value; the start
            // tag keeps absorbing input until a later marker resolves it.
            log::trace!(target: LOG_TARGET, "start tag unresolved at offset {}", token.start);
            return Ok(());
        }

        let model = self
            .open_names
            .last()
            .map(|name| content_model(name))
            .unwrap_or(ContentModel::Ordinary);
        if model == ContentModel::Void || (self_closing && element_namespace == Namespace::Svg) {
            // No children possible: the element is done the moment it opens.
            self.pop_element();
            self.state = ReadState::BetweenTags;
        } else if model == ContentModel::RawText {
            self.state = ReadState::RawTextContent;
        } else {
            self.state = ReadState::BetweenTags;
        }
        self.start_tag_index = token.end;
        self.last_index = token.end;
        Ok(())
    }

    fn raw_text_content(&mut self, token: TokenMatch<'i>) -> Result<(), DomError> {
        let TokenKind::EndTag(name) = token.kind else {
            // Structural tokens are opaque inside raw text.
            return Ok(());
        };
        if !self
            .open_names
            .last()
            .is_some_and(|top| top.eq_ignore_ascii_case(name))
        {
            return Ok(());
        }
        self.flush_raw_text(token.start)?;
        self.mark_raw_text_element()?;
        self.pop_element();
        self.state = ReadState::BetweenTags;
        self.last_index = token.end;
        self.start_tag_index = token.end;
        Ok(())
    }

    /// Trailing input after the last token match.
    fn finish(&mut self) -> Result<(), DomError> {
        match self.state {
            ReadState::BetweenTags => self.flush_text(self.input.len()),
            ReadState::RawTextContent => {
                // Input ended inside a raw-text element: the tail is its
                // content and the element closes implicitly.
                self.flush_raw_text(self.input.len())?;
                self.mark_raw_text_element()?;
                self.pop_element();
                Ok(())
            }
            // Absorbed attribute material with no resolving marker is dropped;
            // the element keeps the attributes accepted so far.
            ReadState::InsideStartTag => Ok(()),
        }
    }

    fn open_element(&mut self, name: &str) -> Result<(), DomError> {
        let model = content_model(name);
        let upper = name.to_ascii_uppercase();
        match model {
            ContentModel::NoFirstLevelSelfDescendants => {
                if self.open_names.last() == Some(&upper) {
                    log::trace!(target: LOG_TARGET, "auto-closing <{name}> before sibling <{name}>");
                    self.pop_element();
                }
            }
            ContentModel::NoSelfDescendants => {
                if let Some(index) = self.open_names.iter().rposition(|n| *n == upper) {
                    log::trace!(
                        target: LOG_TARGET,
                        "auto-closing {} open element(s) up to ancestor <{name}>",
                        self.open_names.len() - index
                    );
                    self.open_elements.truncate(index);
                    self.open_names.truncate(index);
                }
            }
            _ => {}
        }

        // Only the root svg tag switches namespace; exiting foreign content
        // happens by popping, so no switch-back rule exists.
        let (namespace, local_name) = if name.eq_ignore_ascii_case("svg") {
            (Namespace::Svg, "svg")
        } else {
            (self.current_namespace(), name)
        };
        let element = self.document.create_element_ns(namespace, local_name);
        let parent = self.current();
        self.document.append_child(parent, element)?;
        self.open_elements.push(element);
        self.open_names.push(upper);
        log::trace!(target: LOG_TARGET, "opened <{local_name}> depth={}", self.open_elements.len());
        Ok(())
    }

    /// Record the evaluation flag on a closing script/style element.
    fn mark_raw_text_element(&mut self) -> Result<(), DomError> {
        let element = self.current();
        let allowed = match self.open_names.last().map(String::as_str) {
            Some("SCRIPT") => self.evaluate_scripts,
            Some("STYLE") => self.evaluate_css,
            _ => return Ok(()),
        };
        self.document.set_content_evaluation(element, allowed)
    }

    fn flush_text(&mut self, upto: usize) -> Result<(), DomError> {
        if self.last_index >= upto {
            return Ok(());
        }
        let decoded = decode_text(&self.input[self.last_index..upto]);
        self.append_text(&decoded)
    }

    fn flush_raw_text(&mut self, upto: usize) -> Result<(), DomError> {
        if self.start_tag_index >= upto {
            return Ok(());
        }
        // Entity decoding still applies even though no tags are recognized.
        let decoded = decode_text(&self.input[self.start_tag_index..upto]);
        self.append_text(&decoded)
    }

    fn append_text(&mut self, decoded: &str) -> Result<(), DomError> {
        if decoded.is_empty() {
            return Ok(());
        }
        let node = self.document.create_text_node(decoded);
        let parent = self.current();
        self.document.append_child(parent, node)
    }

    fn append_comment(&mut self, text: &str) -> Result<(), DomError> {
        let node = self.document.create_comment(text);
        let parent = self.current();
        self.document.append_child(parent, node)
    }

    fn pop_element(&mut self) {
        let popped = self.open_elements.pop();
        let name = self.open_names.pop();
        debug_assert!(popped.is_some() && name.is_some());
        if let Some(name) = name {
            log::trace!(target: LOG_TARGET, "closed <{}> depth={}", name, self.open_elements.len());
        }
    }

    /// Top of the open-element stack, or the root. Never absent.
    fn current(&self) -> NodeId {
        self.open_elements.last().copied().unwrap_or(self.root)
    }

    fn current_namespace(&self) -> Namespace {
        self.document.namespace_of(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::snapshot::snapshot;

    fn parse_fragment(markup: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = crate::parse(&mut doc, markup, ParseOptions::default()).expect("parse");
        (doc, root)
    }

    fn shape(markup: &str) -> String {
        let (doc, root) = parse_fragment(markup);
        snapshot(&doc, root)
    }

    #[test]
    fn builder_appends_text_and_elements_under_root() {
        assert_eq!(
            shape("<a>text</a>"),
            "#document-fragment\n  <a>\n    \"text\"\n"
        );
    }

    #[test]
    fn builder_ignores_unmatched_end_tags() {
        assert_eq!(
            shape("</nope><b>x</b></nope>"),
            "#document-fragment\n  <b>\n    \"x\"\n"
        );
    }

    #[test]
    fn builder_treats_stray_closers_as_text() {
        assert_eq!(
            shape("a > b<i>c</i>"),
            "#document-fragment\n  \"a > b\"\n  <i>\n    \"c\"\n"
        );
    }

    #[test]
    fn builder_auto_closes_first_level_self_nesting() {
        assert_eq!(
            shape("<p>one<p>two"),
            "#document-fragment\n  <p>\n    \"one\"\n  <p>\n    \"two\"\n"
        );
    }

    #[test]
    fn builder_allows_indirect_p_nesting_to_stay_put() {
        // Only direct self-nesting auto-closes for this model.
        assert_eq!(
            shape("<p><span><p>x"),
            "#document-fragment\n  <p>\n    <span>\n      <p>\n        \"x\"\n"
        );
    }

    #[test]
    fn builder_auto_closes_self_descendants_anywhere_on_stack() {
        assert_eq!(
            shape("<a>one<span><a>two"),
            "#document-fragment\n  <a>\n    \"one\"\n    <span>\n  <a>\n    \"two\"\n"
        );
    }

    #[test]
    fn builder_pops_one_level_for_matching_end_tag_only() {
        assert_eq!(
            shape("<div><span></div>x"),
            "#document-fragment\n  <div>\n    <span>\n      \"x\"\n"
        );
    }

    #[test]
    fn builder_marks_script_and_style_evaluation_flags() {
        let mut doc = Document::new();
        let options = ParseOptions {
            evaluate_scripts: true,
            ..ParseOptions::default()
        };
        let root = crate::parse(&mut doc, "<script>x</script><style>y</style>", options)
            .expect("parse");
        let children = doc.children(root);
        assert_eq!(children.len(), 2);
        let flags: Vec<_> = children
            .iter()
            .map(|&c| match doc.kind(c) {
                dom::NodeKind::Element {
                    evaluate_content, ..
                } => *evaluate_content,
                other => panic!("expected element, got: {other:?}"),
            })
            .collect();
        assert_eq!(flags, vec![Some(true), Some(false)]);
    }

    #[test]
    fn builder_closes_raw_text_element_at_end_of_input() {
        assert_eq!(
            shape("<style>p { color: red; }"),
            "#document-fragment\n  <style>\n    \"p { color: red; }\"\n"
        );
    }

    #[test]
    fn builder_drops_unresolved_start_tag_tail() {
        // No terminator ever arrives, so the attribute material is dropped.
        assert_eq!(shape("<div a=1"), "#document-fragment\n  <div>\n");
    }

    #[test]
    fn builder_absorbs_closer_inside_unterminated_quote() {
        // The first `>` sits inside the quoted value; the tag resolves at the
        // second one and the value keeps the angle bracket.
        assert_eq!(
            shape(r#"<div a="one > two">text</div>"#),
            "#document-fragment\n  <div>\n    a=\"one > two\"\n    \"text\"\n"
        );
    }

    #[test]
    fn builder_empty_input_yields_childless_root() {
        let (doc, root) = parse_fragment("");
        assert!(doc.children(root).is_empty());
    }

    #[test]
    fn builder_folds_processing_instruction_into_comment_in_html() {
        assert_eq!(
            shape("<?xml-stylesheet href=\"x\"?>"),
            "#document-fragment\n  <!-- ?xml-stylesheet href=\"x\" -->\n"
        );
    }

    #[test]
    fn builder_drops_processing_instruction_in_foreign_content() {
        assert_eq!(
            shape("<svg><?target data?></svg>"),
            "#document-fragment\n  <svg svg>\n"
        );
    }

    #[test]
    fn builder_stores_unrecognized_declaration_as_comment() {
        assert_eq!(
            shape("<!ELEMENT note>"),
            "#document-fragment\n  <!-- !ELEMENT note -->\n"
        );
        // Missing separator after the keyword disqualifies the doctype too.
        assert_eq!(
            shape("<!DOCTYPEhtml>"),
            "#document-fragment\n  <!-- !DOCTYPEhtml -->\n"
        );
    }

    #[test]
    fn builder_inherits_svg_namespace_until_popped() {
        assert_eq!(
            shape("<svg><rect/></svg><div></div>"),
            "#document-fragment\n  <svg svg>\n    <svg rect>\n  <div>\n"
        );
    }

    #[test]
    fn builder_preserves_tag_casing_except_root_svg() {
        assert_eq!(
            shape("<SVG><Circle/></SVG>"),
            "#document-fragment\n  <svg svg>\n    <svg Circle>\n"
        );
    }

    #[test]
    fn builder_self_close_is_inert_in_html_namespace() {
        // `<div/>` does not close in html; the end tag does.
        assert_eq!(
            shape("<div/>x</div>y"),
            "#document-fragment\n  <div>\n    \"x\"\n  \"y\"\n"
        );
    }

    #[test]
    fn builder_routes_svg_xmlns_attribute_to_xmlns_namespace() {
        let (doc, root) = parse_fragment(r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#);
        let svg = doc.children(root)[0];
        assert_eq!(
            doc.attribute(svg, Some(Namespace::Xmlns), "xmlns"),
            Some("http://www.w3.org/2000/svg")
        );
        assert_eq!(doc.attribute(svg, None, "xmlns"), None);
    }

    #[test]
    fn builder_plain_xmlns_outside_svg_is_ordinary() {
        let (doc, root) = parse_fragment(r#"<div xmlns="x"></div>"#);
        let div = doc.children(root)[0];
        assert_eq!(doc.attribute(div, None, "xmlns"), Some("x"));
    }

    #[test]
    fn builder_parses_into_supplied_root() {
        let mut doc = Document::new();
        let host = doc.create_element_ns(Namespace::Html, "section");
        let options = ParseOptions {
            root: Some(host),
            ..ParseOptions::default()
        };
        let returned = crate::parse(&mut doc, "<em>hi</em>", options).expect("parse");
        assert_eq!(returned, host);
        assert_eq!(doc.children(host).len(), 1);
    }

    #[test]
    fn builder_decodes_entities_in_text_attributes_and_raw_text() {
        assert_eq!(
            shape(r#"<p title="a &amp; b">x &lt; y</p><title>&#215;</title>"#),
            "#document-fragment\n  <p>\n    title=\"a & b\"\n    \"x < y\"\n  <title>\n    \"×\"\n"
        );
    }
}
