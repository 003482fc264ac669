//! JSON rendering of documents and render trees.

use crate::error::Result;
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a [`Document`](crate::Document), [`RenderTree`](super::RenderTree)
/// or any other serializable model value.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ResumeParser;
    use crate::render::render_screen;

    #[test]
    fn test_document_json() {
        let doc = ResumeParser::new().parse("Jane Doe\n• Built APIs").unwrap();
        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"kind\": \"bullet\""));
        assert!(json.contains("\"raw_text\": \"Built APIs\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_render_tree_json_compact() {
        let doc = ResumeParser::new().parse("Jane Doe\n• Built APIs").unwrap();
        let json = to_json(&render_screen(&doc), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"role\":\"list_item\""));
        assert!(json.contains("\"highlight\":\"tech\""));
    }
}
