//! Stem persistence: the stem element inside a chord in the score file.
//!
//! Only the user length and a non-styled line width are stored; the base
//! length is recomputed by chord layout on load.
//!
//! ```xml
//! <Stem>
//!   <userLen>2.5</userLen>
//!   <lineWidth>1.2</lineWidth>
//! </Stem>
//! ```

use roxmltree::{Document, Node};
use tracing::warn;

use crate::error::StemError;
use crate::property::Pid;
use crate::stem::Stem;

/// Serialize the stem's non-default properties.
pub fn write_stem(stem: &Stem) -> String {
    let mut xml = String::from("<Stem>\n");
    if !stem.is_default(Pid::UserLen) {
        xml.push_str(&format!(
            "  <{0}>{1}</{0}>\n",
            Pid::UserLen.xml_name(),
            stem.user_length()
        ));
    }
    if !stem.is_default(Pid::LineWidth) {
        xml.push_str(&format!(
            "  <{0}>{1}</{0}>\n",
            Pid::LineWidth.xml_name(),
            stem.line_width()
        ));
    }
    xml.push_str("</Stem>\n");
    xml
}

/// Read a `<Stem>` element into `stem`. Unknown tags are skipped.
pub fn read_stem(xml: &str, stem: &mut Stem) -> Result<(), StemError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "Stem" {
        return Err(StemError::UnexpectedRoot(root.tag_name().name().to_string()));
    }

    for child in root.children().filter(|n| n.is_element()) {
        let tag = child.tag_name().name();
        if tag == Pid::UserLen.xml_name() {
            stem.set_user_length(parse_real(&child)?);
        } else if tag == Pid::LineWidth.xml_name() {
            stem.set_line_width(parse_real(&child)?);
        } else {
            warn!(tag, "unknown tag in <Stem>");
        }
    }

    Ok(())
}

fn parse_real(node: &Node) -> Result<f64, StemError> {
    let text = node.text().map(str::trim).unwrap_or("");
    text.parse().map_err(|_| StemError::InvalidNumber {
        tag: node.tag_name().name().to_string(),
        value: text.to_string(),
    })
}
