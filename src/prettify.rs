//! Pretty printer for the markup half of a minutes pair.
//!
//! Output follows the shape BeautifulSoup's `prettify` gives pandoc HTML: every
//! tag and every non-blank text run on its own line, indented by depth. The
//! printer is a fixed point: parsing its output and printing again yields the
//! same bytes, which is what lets the table copy step rely on line boundaries.

use crate::error::Result;
use crate::pipeline::list_files;
use crate::types::PrettifyReport;
use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const VOID_ELEMENTS: [&str; 18] = [
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

// Children are written exactly as parsed
const PREFORMATTED: [&str; 3] = ["pre", "textarea", "listing"];

// Text children are written without entity escaping
const RAW_TEXT: [&str; 8] = [
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "plaintext",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn start_tag(element: &scraper::node::Element) -> String {
    let mut tag = format!("<{}", element.name());
    for (name, value) in element.attrs() {
        tag.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
    }
    if is_void(element.name()) {
        tag.push_str("/>");
    } else {
        tag.push('>');
    }
    tag
}

fn doctype(doctype: &scraper::node::Doctype) -> String {
    let mut out = format!("<!DOCTYPE {}", doctype.name());
    if !doctype.public_id().is_empty() {
        out.push_str(&format!(" PUBLIC \"{}\"", doctype.public_id()));
        if !doctype.system_id().is_empty() {
            out.push_str(&format!(" \"{}\"", doctype.system_id()));
        }
    } else if !doctype.system_id().is_empty() {
        out.push_str(&format!(" SYSTEM \"{}\"", doctype.system_id()));
    }
    out.push('>');
    out
}

/// Line-per-node HTML serializer with a fixed indent width.
pub struct Prettifier {
    indent_width: usize,
}

impl Prettifier {
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Parses `html` permissively and returns its pretty form.
    pub fn prettify_str(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        let mut out = String::with_capacity(html.len());
        for child in document.tree.root().children() {
            self.write_node(child, 0, &mut out);
        }
        out
    }

    /// Pretty form of a single element subtree, indented as if it sat at `depth`.
    pub fn prettify_element(&self, element: ElementRef<'_>, depth: usize) -> String {
        let mut out = String::new();
        self.write_node(*element, depth, &mut out);
        out
    }

    fn push_line(&self, out: &mut String, depth: usize, content: &str) {
        out.push_str(&" ".repeat(depth * self.indent_width));
        out.push_str(content);
        out.push('\n');
    }

    fn write_node(&self, node: NodeRef<'_, Node>, depth: usize, out: &mut String) {
        match node.value() {
            Node::Document | Node::Fragment => {
                for child in node.children() {
                    self.write_node(child, depth, out);
                }
            }
            Node::Doctype(dt) => self.push_line(out, depth, &doctype(dt)),
            Node::Comment(comment) => {
                self.push_line(out, depth, &format!("<!--{}-->", &**comment))
            }
            Node::ProcessingInstruction(pi) => {
                self.push_line(out, depth, &format!("<?{} {}>", &*pi.target, &*pi.data))
            }
            Node::Text(text) => {
                let trimmed = text.trim_matches(is_html_whitespace);
                if trimmed.is_empty() {
                    return;
                }
                let raw_parent = node
                    .parent()
                    .and_then(|p| p.value().as_element().map(|e| RAW_TEXT.contains(&e.name())))
                    .unwrap_or(false);
                if raw_parent {
                    self.push_line(out, depth, trimmed);
                } else {
                    self.push_line(out, depth, &escape_text(trimmed));
                }
            }
            Node::Element(element) => {
                let name = element.name();
                if is_void(name) {
                    self.push_line(out, depth, &start_tag(element));
                } else if PREFORMATTED.contains(&name) {
                    let mut line = start_tag(element);
                    let mut inner = String::new();
                    for child in node.children() {
                        write_inline(child, &mut inner);
                    }
                    // A newline right after the start tag is swallowed by the parser
                    if inner.starts_with('\n') {
                        line.push('\n');
                    }
                    line.push_str(&inner);
                    line.push_str(&format!("</{}>", name));
                    self.push_line(out, depth, &line);
                } else {
                    self.push_line(out, depth, &start_tag(element));
                    for child in node.children() {
                        self.write_node(child, depth + 1, out);
                    }
                    self.push_line(out, depth, &format!("</{}>", name));
                }
            }
        }
    }

    /// Rewrites one markup file in place; returns whether its bytes changed.
    pub fn prettify_file(&self, path: &Path) -> Result<bool> {
        let html = fs::read_to_string(path)?;
        let pretty = self.prettify_str(&html);
        if pretty == html {
            debug!("{} already normalized", path.display());
            return Ok(false);
        }
        fs::write(path, pretty)?;
        Ok(true)
    }

    /// Normalizes every file with the markup extension in `dir`.
    pub fn prettify_dir(&self, dir: &Path, markup_extension: &str) -> Result<PrettifyReport> {
        let mut report = PrettifyReport::default();
        for path in list_files(dir, markup_extension)? {
            if self.prettify_file(&path)? {
                info!("Normalized {}", path.display());
                report.rewritten.push(path);
            } else {
                report.unchanged.push(path);
            }
        }
        Ok(report)
    }
}

// Verbatim serialization for the inside of preformatted elements
fn write_inline(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Comment(comment) => out.push_str(&format!("<!--{}-->", &**comment)),
        Node::Element(element) => {
            out.push_str(&start_tag(element));
            if !is_void(element.name()) {
                for child in node.children() {
                    write_inline(child, out);
                }
                out.push_str(&format!("</{}>", element.name()));
            }
        }
        _ => {}
    }
}
