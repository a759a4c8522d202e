//! Export entry point
//!
//! Export is a pure function of `(Specification, ExportOptions)`. Files are
//! emitted in a fixed order and nothing time- or environment-dependent is
//! written, so repeated calls produce byte-identical packages.

use crate::error::ExportError;
use crate::expr::ConstructionExpr;
use crate::options::{ExportOptions, FileLayout, Packaging};
use crate::{jsx, schema, tree};
use tracing::{debug, instrument};
use uigen_spec::{ContentHash, ExportFile, ExportFormat, ExportPackage, Specification};

/// Serialize a specification into an export package
///
/// No validation is performed; the specification is trusted.
///
/// # Errors
/// Returns error if a component kind or property name cannot be expressed in
/// the generated source, or if JSON encoding fails
#[instrument(skip_all, fields(format = options.format.as_str(), components = spec.components.len()))]
pub fn export(spec: &Specification, options: &ExportOptions) -> Result<ExportPackage, ExportError> {
    let mut files = Vec::new();

    if matches!(options.format, ExportFormat::Jsx | ExportFormat::All) {
        let exprs = spec
            .components
            .iter()
            .enumerate()
            .map(|(index, node)| ConstructionExpr::from_node(index, node))
            .collect::<Result<Vec<_>, _>>()?;

        files.extend(jsx::source_files(spec, &exprs, options));
        if options.include_stylesheet {
            files.push(jsx::stylesheet(spec));
        }
        if options.packaging == Packaging::Npm {
            files.push(jsx::package_manifest(spec)?);
        }
    }

    if matches!(options.format, ExportFormat::Schema | ExportFormat::All) {
        files.extend(schema::schema_files(spec)?);
    }

    if matches!(options.format, ExportFormat::Tree | ExportFormat::All) {
        files.push(tree::tree_file(spec));
    }

    let fingerprint = fingerprint(&files);
    debug!(files = files.len(), fingerprint = %fingerprint.short(), "export complete");

    Ok(ExportPackage {
        format: options.format,
        instructions: instructions(options),
        files,
        fingerprint,
    })
}

fn fingerprint(files: &[ExportFile]) -> ContentHash {
    let mut hasher = blake3::Hasher::new();
    for file in files {
        hasher.update(file.name.as_bytes());
        hasher.update(&[0]);
        hasher.update(file.content.as_bytes());
        hasher.update(&[0]);
    }
    ContentHash::new(*hasher.finalize().as_bytes())
}

fn instructions(options: &ExportOptions) -> String {
    let mut lines = Vec::new();

    if matches!(options.format, ExportFormat::Jsx | ExportFormat::All) {
        match options.packaging {
            Packaging::Npm => lines.push(
                "Run `npm install` in the package directory, then import the default export from `index.js`."
                    .to_string(),
            ),
            Packaging::Plain => lines.push(
                "Copy the source files into a React project that provides `@uigen/components` and render `App`."
                    .to_string(),
            ),
        }
        if options.layout == FileLayout::PerComponent {
            lines.push("Each component lives in its own file under `components/`.".to_string());
        }
        if options.include_stylesheet {
            lines.push("`styles.css` holds the layout rules and is imported by `App.jsx`.".to_string());
        }
    }
    if matches!(options.format, ExportFormat::Schema | ExportFormat::All) {
        lines.push(
            "Validate `specification.json` against `schema.json` with any JSON Schema validator."
                .to_string(),
        );
    }
    if matches!(options.format, ExportFormat::Tree | ExportFormat::All) {
        lines.push("`tree.txt` is a read-only outline of the component tree.".to_string());
    }

    lines.join("\n")
}
