//! XML fragment rendering for the `.xmind` container members.
//!
//! # Responsibility
//! - Render `content.xml` from a topic tree, `meta.xml` and
//!   `META-INF/manifest.xml` as fixed documents.
//!
//! # Invariants
//! - A topic with zero children emits no `<children>` wrapper at all.
//! - Child order in the XML matches insertion order in the tree.
//! - Escaping runs in one left-to-right pass, so already-escaped output is
//!   never escaped again.

use crate::model::topic::{MindMap, Topic};

/// Escapes text for embedding in XML text content.
///
/// Single pass over the input; `&` produced by an earlier substitution is
/// never revisited.
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Renders the `content.xml` member for one mind map.
pub fn render_content(mind_map: &MindMap) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<xmap-content xmlns="urn:xmind:xmap:xmlns:content:2.0" xmlns:fo="http://www.w3.org/1999/XSL/Format" xmlns:svg="http://www.w3.org/2000/svg" xmlns:xhtml="http://www.w3.org/1999/xhtml" xmlns:xlink="http://www.w3.org/1999/xlink" version="2.0">
  <sheet id="sheet_1" timestamp="0">
    <title>{title}</title>
{topics}
  </sheet>
</xmap-content>"#,
        title = escape_xml(&mind_map.title),
        topics = render_topic(&mind_map.root_topic, "    "),
    )
}

/// Renders the fixed `meta.xml` member identifying the authoring tool.
pub fn render_meta() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<meta xmlns="urn:xmind:xmap:xmlns:meta:2.0" version="2.0">
  <Author>
    <Name>Mindmap MCP Server</Name>
  </Author>
</meta>"#
}

/// Renders the fixed `META-INF/manifest.xml` member listing the container
/// entries and their media types.
pub fn render_manifest() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<manifest xmlns="urn:xmind:xmap:xmlns:manifest:1.0">
  <file-entry full-path="content.xml" media-type="text/xml"/>
  <file-entry full-path="META-INF/" media-type=""/>
  <file-entry full-path="META-INF/manifest.xml" media-type="text/xml"/>
  <file-entry full-path="meta.xml" media-type="text/xml"/>
</manifest>"#
}

/// Renders one topic subtree. Each nesting level indents six spaces past
/// its parent; the root starts at four.
fn render_topic(topic: &Topic, indent: &str) -> String {
    let children_block = if topic.children.is_empty() {
        String::new()
    } else {
        let wrapped = topic
            .children
            .iter()
            .map(|child| {
                format!(
                    "{indent}    <topics type=\"attached\">\n{inner}\n{indent}    </topics>",
                    inner = render_topic(child, &format!("{indent}      ")),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("\n{indent}  <children>\n{wrapped}\n{indent}  </children>\n{indent}")
    };

    format!(
        "{indent}<topic id=\"{id}\" timestamp=\"0\">\n{indent}  <title>{title}</title>{children_block}</topic>",
        id = topic.id,
        title = escape_xml(&topic.title),
    )
}
