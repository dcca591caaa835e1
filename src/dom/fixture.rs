//! Page fixtures: YAML/JSON element trees loaded into a [`Document`] and rendered back to HTML

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use super::{Document, Node, NodeId};
use crate::domain::I18nError;

const VOID_ELEMENTS: &[&str] =
    &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

/// Serializable description of a page body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSpec {
    /// Initial value of the root `lang` attribute
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub body: Vec<NodeSpec>
}

/// A node in a page fixture; a bare `text` entry becomes a text node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Text {
        text: String
    },
    Element {
        tag:      String,
        #[serde(default)]
        attrs:    BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<NodeSpec>
    }
}

impl PageSpec {
    pub fn from_yaml(content: &str) -> Result<Self, I18nError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, I18nError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a page file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_path(path: &Path) -> Result<Self, I18nError> {
        let content = fs::read_to_string(path)
            .map_err(|e| I18nError::FileSystem(format!("Failed to read page {}: {}", path.display(), e)))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content)
        }
    }

    /// Build a fresh document from this description
    pub fn build(&self) -> Result<Document, I18nError> {
        let mut document = Document::new();
        if let Some(lang) = &self.lang {
            document.set_attribute(document.root(), "lang", lang);
        }
        let body = document.body();
        for spec in &self.body {
            let node = spec.build(&mut document)?;
            document.append_child(body, node)?;
        }
        Ok(document)
    }
}

impl NodeSpec {
    fn build(&self, document: &mut Document) -> Result<NodeId, I18nError> {
        match self {
            NodeSpec::Text { text } => Ok(document.create_text(text.as_str())),
            NodeSpec::Element { tag, attrs, children } => {
                if tag.trim().is_empty() {
                    return Err(I18nError::Document("Element without a tag name".to_string()));
                }
                let element = document.create_element(tag);
                for (name, value) in attrs {
                    document.set_attribute(element, name, value);
                }
                for child in children {
                    let node = child.build(document)?;
                    document.append_child(element, node)?;
                }
                Ok(element)
            }
        }
    }
}

impl Document {
    /// Serialize the whole document as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(self.root(), &mut out);
        out
    }

    /// Serialize a single node and its subtree as HTML
    pub fn node_to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            None => {}
            Some(Node::Text(content)) => out.push_str(&escape(content, false)),
            Some(Node::Element(element)) => {
                out.push('<');
                out.push_str(element.tag());
                for (name, value) in element.attributes() {
                    out.push_str(&format!(" {}=\"{}\"", name, escape(value, true)));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag()) {
                    return;
                }
                for child in element.children() {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", element.tag()));
            }
        }
    }
}

fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            other => escaped.push(other)
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
lang: en
body:
  - tag: a
    attrs: { id: langButton, href: "#" }
    children:
      - text: "EN "
      - tag: svg
  - tag: input
    attrs: { data-i18n: email_placeholder, placeholder: "Your email" }
"##;

    #[test]
    fn test_build_from_yaml() {
        let document = PageSpec::from_yaml(PAGE).unwrap().build().unwrap();

        assert_eq!(document.attribute(document.root(), "lang"), Some("en"));
        let button = document.get_element_by_id("langButton").unwrap();
        assert_eq!(document.children(button).len(), 2);
        assert_eq!(document.text_content(button), "EN ");
        assert_eq!(document.elements_with_attribute("data-i18n").len(), 1);
    }

    #[test]
    fn test_render_escapes_and_skips_void_closing_tags() {
        let mut document = Document::new();
        let paragraph = document.create_element("p");
        let text = document.create_text("Fish & <Chips>");
        document.append_child(paragraph, text).unwrap();
        let input = document.create_element("input");
        document.set_attribute(input, "placeholder", "\"quoted\"");

        assert_eq!(document.node_to_html(paragraph), "<p>Fish &amp; &lt;Chips&gt;</p>");
        assert_eq!(document.node_to_html(input), "<input placeholder=\"&quot;quoted&quot;\">");
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        let spec = PageSpec { lang: None, body: vec![NodeSpec::Element {
            tag:      " ".to_string(),
            attrs:    BTreeMap::new(),
            children: vec![]
        }] };
        assert!(matches!(spec.build(), Err(I18nError::Document(_))));
    }

    #[test]
    fn test_json_fixture() {
        let spec = PageSpec::from_json(r#"{"body":[{"tag":"option","attrs":{"data-i18n":"opt"},"children":[{"text":"One"}]}]}"#)
            .unwrap();
        let document = spec.build().unwrap();
        assert_eq!(document.text_content(document.body()), "One");
    }

    #[test]
    fn test_from_path_picks_parser_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let json = dir.path().join("page.json");
        fs::write(&json, r#"{"body": [{"tag": "p", "children": [{"text": "Hi"}]}]}"#).unwrap();
        let yaml = dir.path().join("page.yml");
        fs::write(&yaml, "body:\n  - tag: p\n    children: [ { text: Hi } ]\n").unwrap();

        let from_json = PageSpec::from_path(&json).unwrap().build().unwrap();
        let from_yaml = PageSpec::from_path(&yaml).unwrap().build().unwrap();

        assert_eq!(from_json.to_html(), from_yaml.to_html());
        assert!(matches!(PageSpec::from_path(&dir.path().join("absent.yaml")), Err(I18nError::FileSystem(_))));
    }
}
