//! JSX source rendering

use crate::expr::{ConstructionExpr, Literal};
use crate::options::{ExportOptions, FileLayout, Packaging};
use std::collections::BTreeSet;
use std::fmt::Write;
use uigen_spec::{Arrangement, ExportFile, FileKind, Specification};

const HEADER: &str = "// Generated by uigen. Do not edit by hand.";
const COMPONENT_LIBRARY: &str = "@uigen/components";

/// Render one expression as a JSX element at the given indent
pub(crate) fn render_element(expr: &ConstructionExpr, indent: usize) -> String {
    let pad = " ".repeat(indent);
    if expr.attributes.is_empty() {
        return format!("{pad}<{} />", expr.kind);
    }

    let mut out = format!("{pad}<{}", expr.kind);
    for attr in &expr.attributes {
        let rendered = match &attr.value {
            Literal::Quoted(s) if needs_container(s) => format!("{}={{{}}}", attr.name, s),
            Literal::Quoted(s) => format!("{}={}", attr.name, s),
            Literal::Flag(true) => attr.name.clone(),
            Literal::Flag(false) => format!("{}={{false}}", attr.name),
            Literal::Bare(n) => format!("{}={{{}}}", attr.name, n),
            Literal::Structured(json) => format!("{}={{{}}}", attr.name, json),
        };
        let _ = write!(out, "\n{pad}  {rendered}");
    }
    let _ = write!(out, "\n{pad}/>");
    out
}

/// JSX attribute strings take no backslash escapes and decode `&` entities,
/// so such literals go inside an expression container.
fn needs_container(quoted: &str) -> bool {
    quoted.contains('\\') || quoted.contains('&')
}

fn layout_class(spec: &Specification) -> &'static str {
    match spec.layout.as_ref().map(|l| l.arrangement).unwrap_or_default() {
        Arrangement::Stack => "uigen-layout uigen-layout--stack",
        Arrangement::Grid => "uigen-layout uigen-layout--grid",
        Arrangement::Columns => "uigen-layout uigen-layout--columns",
    }
}

fn spec_banner(spec: &Specification) -> String {
    format!(
        "{HEADER}\n// Specification: {} (v{})\n",
        spec.name.as_deref().unwrap_or("Untitled"),
        spec.version()
    )
}

fn library_import(exprs: &[ConstructionExpr]) -> String {
    let kinds: BTreeSet<&str> = exprs.iter().map(|e| e.kind.as_str()).collect();
    let list: Vec<&str> = kinds.into_iter().collect();
    format!("import {{ {} }} from \"{COMPONENT_LIBRARY}\";\n", list.join(", "))
}

/// Source files for the requested layout
pub(crate) fn source_files(
    spec: &Specification,
    exprs: &[ConstructionExpr],
    options: &ExportOptions,
) -> Vec<ExportFile> {
    let mut files = match options.layout {
        FileLayout::SingleFile => vec![single_file(spec, exprs, options)],
        FileLayout::PerComponent => per_component(spec, exprs, options),
    };

    if options.packaging == Packaging::Npm {
        files.push(ExportFile::new(
            "index.js",
            format!("{HEADER}\nexport {{ default }} from \"./App.jsx\";\n"),
            FileKind::Source,
        ));
    }
    files
}

fn app_shell(spec: &Specification, imports: &str, body: &str, options: &ExportOptions) -> String {
    let mut out = spec_banner(spec);
    out.push_str("import React from \"react\";\n");
    out.push_str(imports);
    if options.include_stylesheet {
        out.push_str("import \"./styles.css\";\n");
    }
    let _ = write!(
        out,
        "\nexport default function App() {{\n  return (\n    <div className=\"{}\">\n{}    </div>\n  );\n}}\n",
        layout_class(spec),
        body
    );
    out
}

fn single_file(spec: &Specification, exprs: &[ConstructionExpr], options: &ExportOptions) -> ExportFile {
    let imports = if exprs.is_empty() {
        String::new()
    } else {
        library_import(exprs)
    };
    let body: String = exprs
        .iter()
        .map(|e| format!("{}\n", render_element(e, 6)))
        .collect();
    ExportFile::new("App.jsx", app_shell(spec, &imports, &body, options), FileKind::Source)
}

fn section_name(index: usize, expr: &ConstructionExpr) -> String {
    format!("{}{}", expr.kind, index)
}

fn per_component(
    spec: &Specification,
    exprs: &[ConstructionExpr],
    options: &ExportOptions,
) -> Vec<ExportFile> {
    let mut files = Vec::with_capacity(exprs.len() + 1);
    let mut imports = String::new();
    let mut body = String::new();

    for (index, expr) in exprs.iter().enumerate() {
        let name = section_name(index, expr);
        let content = format!(
            "{HEADER}\nimport React from \"react\";\nimport {{ {} }} from \"{COMPONENT_LIBRARY}\";\n\nexport function {name}() {{\n  return (\n{}\n  );\n}}\n",
            expr.kind,
            render_element(expr, 4)
        );
        files.push(ExportFile::new(
            format!("components/{name}.jsx"),
            content,
            FileKind::Source,
        ));
        let _ = writeln!(imports, "import {{ {name} }} from \"./components/{name}.jsx\";");
        let _ = writeln!(body, "      <{name} />");
    }

    files.push(ExportFile::new(
        "App.jsx",
        app_shell(spec, &imports, &body, options),
        FileKind::Source,
    ));
    files
}

fn spacing_px(token: Option<&str>) -> u32 {
    match token {
        Some("xs") => 4,
        Some("sm") => 8,
        Some("lg") => 24,
        Some("xl") => 32,
        _ => 16,
    }
}

/// Companion stylesheet derived from the layout hints
pub(crate) fn stylesheet(spec: &Specification) -> ExportFile {
    let layout = spec.layout.clone().unwrap_or_default();
    let gap = spacing_px(layout.spacing.as_deref());
    let mut css = format!("/* Generated by uigen. Do not edit by hand. */\n.uigen-layout {{\n  gap: {gap}px;\n  margin: 0 auto;\n");
    if let Some(max) = layout.max_width {
        let _ = writeln!(css, "  max-width: {max}px;");
    }
    css.push_str("}\n");
    css.push_str(
        ".uigen-layout--stack {\n  display: flex;\n  flex-direction: column;\n}\n\
         .uigen-layout--grid {\n  display: grid;\n  grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));\n}\n\
         .uigen-layout--columns {\n  display: flex;\n  flex-direction: row;\n}\n",
    );
    ExportFile::new("styles.css", css, FileKind::Stylesheet)
}

/// `package.json` for npm packaging
pub(crate) fn package_manifest(spec: &Specification) -> Result<ExportFile, serde_json::Error> {
    let manifest = serde_json::json!({
        "name": package_name(spec.name.as_deref().unwrap_or("uigen-app")),
        "version": format!("0.{}.0", spec.version()),
        "private": true,
        "main": "index.js",
        "peerDependencies": {
            "react": ">=18",
            COMPONENT_LIBRARY: "*"
        }
    });
    let mut content = serde_json::to_string_pretty(&manifest)?;
    content.push('\n');
    Ok(ExportFile::new("package.json", content, FileKind::Manifest))
}

fn package_name(name: &str) -> String {
    let slug: String = name
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let trimmed: Vec<&str> = slug.split('-').filter(|s| !s.is_empty()).collect();
    if trimmed.is_empty() {
        "uigen-app".to_string()
    } else {
        trimmed.join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Attribute;
    use pretty_assertions::assert_eq;

    fn card_expr() -> ConstructionExpr {
        ConstructionExpr {
            kind: "Card".into(),
            attributes: vec![
                Attribute {
                    name: "title".into(),
                    value: Literal::Quoted("\"Hello\"".into()),
                },
                Attribute {
                    name: "elevated".into(),
                    value: Literal::Flag(true),
                },
                Attribute {
                    name: "hidden".into(),
                    value: Literal::Flag(false),
                },
                Attribute {
                    name: "columns".into(),
                    value: Literal::Bare("3".into()),
                },
            ],
        }
    }

    #[test]
    fn element_rendering() {
        let rendered = render_element(&card_expr(), 2);
        assert_eq!(
            rendered,
            "  <Card\n    title=\"Hello\"\n    elevated\n    hidden={false}\n    columns={3}\n  />"
        );
    }

    #[test]
    fn escaped_text_uses_expression_container() {
        let title = crate::literal(&uigen_spec::PropValue::from("Say \"hi\"\nnow")).unwrap();
        let expr = ConstructionExpr {
            kind: "Card".into(),
            attributes: vec![
                Attribute {
                    name: "title".into(),
                    value: title,
                },
                Attribute {
                    name: "note".into(),
                    value: crate::literal(&uigen_spec::PropValue::from("Terms & conditions")).unwrap(),
                },
            ],
        };
        let rendered = render_element(&expr, 0);
        assert_eq!(
            rendered,
            "<Card\n  title={\"Say \\\"hi\\\"\\nnow\"}\n  note={\"Terms & conditions\"}\n/>"
        );
        assert!(!rendered.contains("=\"Say"));
        assert!(!rendered.contains("title=\""));
    }

    #[test]
    fn element_without_attributes_self_closes() {
        let expr = ConstructionExpr {
            kind: "Image".into(),
            attributes: vec![],
        };
        assert_eq!(render_element(&expr, 0), "<Image />");
    }

    #[test]
    fn package_name_slugs() {
        assert_eq!(package_name("SaaS Pricing Page!"), "saas-pricing-page");
        assert_eq!(package_name("***"), "uigen-app");
    }

    #[test]
    fn spacing_tokens() {
        assert_eq!(spacing_px(Some("lg")), 24);
        assert_eq!(spacing_px(None), 16);
    }
}
