//! ASCII tree view of a specification

use std::fmt::Write;
use uigen_spec::{ExportFile, FileKind, PropValue, Specification};

fn summarize(value: &PropValue) -> String {
    match value {
        PropValue::Text(s) => format!("{s:?}"),
        PropValue::Flag(b) => b.to_string(),
        PropValue::Number(n) => n.to_string(),
        PropValue::List(items) => format!("[{} items]", items.len()),
        PropValue::Map(map) => format!("{{{} keys}}", map.len()),
    }
}

/// Render the tree text
#[must_use]
pub fn render_tree(spec: &Specification) -> String {
    let mut out = format!(
        "{} (v{})\n",
        spec.name.as_deref().unwrap_or("Untitled"),
        spec.version()
    );
    if let Some(layout) = &spec.layout {
        let _ = writeln!(out, "layout: {}", layout.arrangement.as_str());
    }

    let count = spec.components.len();
    for (index, node) in spec.components.iter().enumerate() {
        let last = index + 1 == count;
        let (branch, stem) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        let _ = writeln!(out, "{branch}{} #{index}", node.kind);

        let props = node.properties.len();
        for (i, (name, value)) in node.properties.iter().enumerate() {
            let leaf = if i + 1 == props { "└── " } else { "├── " };
            let _ = writeln!(out, "{stem}{leaf}{name}: {}", summarize(value));
        }
    }
    out
}

pub(crate) fn tree_file(spec: &Specification) -> ExportFile {
    ExportFile::new("tree.txt", render_tree(spec), FileKind::Text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uigen_spec::{props, ComponentNode};

    #[test]
    fn renders_branches_and_summaries() {
        let spec = Specification::new()
            .with_name("Landing")
            .with_component(
                ComponentNode::new("PricingTable")
                    .unwrap()
                    .with_prop("title", "Plans")
                    .with_prop("tiers", vec![PropValue::from(props! { "name" => "Pro" })]),
            )
            .with_component(ComponentNode::new("Button").unwrap().with_prop("disabled", false));

        let expected = "\
Landing (v1)
├── PricingTable #0
│   ├── title: \"Plans\"
│   └── tiers: [1 items]
└── Button #1
    └── disabled: false
";
        assert_eq!(render_tree(&spec), expected);
    }

    #[test]
    fn empty_spec_has_header_only() {
        assert_eq!(render_tree(&Specification::new()), "Untitled (v1)\n");
    }
}
