//! JSON Schema and document export

use crate::error::ExportError;
use schemars::schema_for;
use uigen_spec::{ExportFile, FileKind, Specification};

/// `schema.json` describing every specification, and
/// `specification.json` holding this one
pub(crate) fn schema_files(spec: &Specification) -> Result<Vec<ExportFile>, ExportError> {
    let schema = schema_for!(Specification);
    let mut schema_json = serde_json::to_string_pretty(&schema)?;
    schema_json.push('\n');

    let mut document = serde_json::to_string_pretty(spec)?;
    document.push('\n');

    Ok(vec![
        ExportFile::new("schema.json", schema_json, FileKind::Schema),
        ExportFile::new("specification.json", document, FileKind::Schema),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use uigen_spec::ComponentNode;

    #[test]
    fn document_round_trips() {
        let spec = Specification::new()
            .with_name("Doc")
            .with_component(ComponentNode::new("Card").unwrap().with_prop("title", "A"));
        let files = schema_files(&spec).unwrap();
        assert_eq!(files.len(), 2);

        let parsed: Specification = serde_json::from_str(&files[1].content).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn schema_names_the_root_type() {
        let files = schema_files(&Specification::new()).unwrap();
        let schema: serde_json::Value = serde_json::from_str(&files[0].content).unwrap();
        assert_eq!(schema["title"], "Specification");
        assert!(schema["properties"]["components"].is_object());
    }
}
