use std::collections::HashSet;
use std::path::{Path, PathBuf};

use libxml::{
    error::StructuredError,
    parser::{Parser, ParserOptions},
    schemas::{SchemaParserContext, SchemaValidationContext},
    tree::{Document, Node},
};
use tracing::trace;

use super::source::{location_str, ReferencePolicy, XmlSource};
use crate::errors::{Result, XsdError};

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Schema elements whose `schemaLocation` libxml2 loads on its own.
const COMPOSITION_ELEMENTS: [&str; 3] = ["include", "import", "redefine"];

fn format_structured_errors(errors: Vec<StructuredError>) -> String {
    errors
        .iter()
        .map(|se| format!("{:?}", se))
        .collect::<Vec<String>>()
        .join("; ")
}

// Strict parsing: no recovery from malformed markup and no network fetches.
// Inline text is already UTF-8, whatever its XML declaration claims.
fn parser_options(inline: bool) -> ParserOptions<'static> {
    ParserOptions {
        recover: false,
        no_net: true,
        ignore_enc: inline,
        encoding: if inline { Some("UTF-8") } else { None },
        ..Default::default()
    }
}

fn parse_source(source: &XmlSource<'_>) -> std::result::Result<Document, String> {
    let parser = Parser::default();
    let parsed = match source {
        XmlSource::Inline(text) => parser.parse_string_with_options(*text, parser_options(true)),
        XmlSource::Location(path) => {
            let path = location_str(path).map_err(|e| e.to_string())?;
            parser.parse_file_with_options(path, parser_options(false))
        }
    };
    parsed.map_err(|e| format!("{:?}", e))
}

/// XSD schema compiled for a single validation call.
///
/// Wraps libxml2 contexts, which are neither `Send` nor `Sync`; build one per
/// call on the thread that uses it.
pub struct XsdValidator {
    context: SchemaValidationContext,
    // outlives the compiled schema built from it
    _schema_document: Document,
}

impl XsdValidator {
    /// Compile a schema from inline text or a resolved file.
    ///
    /// Every `schemaLocation` reachable through include, import or redefine
    /// must resolve under `references` before libxml2 sees the schema.
    pub fn compile(schema: &XmlSource<'_>, references: &ReferencePolicy) -> Result<Self> {
        let schema_document = parse_source(schema).map_err(XsdError::SchemaParse)?;

        let base_dir = match schema {
            XmlSource::Inline(_) => None,
            XmlSource::Location(path) => path.parent().map(Path::to_path_buf),
        };
        if let Some(root) = schema_document.get_root_element() {
            let mut visited = HashSet::new();
            confine_locations(&root, base_dir.as_deref(), references, &mut visited, true)?;
        }

        let mut parser_ctx = SchemaParserContext::from_document(&schema_document);
        let context = SchemaValidationContext::from_parser(&mut parser_ctx)
            .map_err(|errors| XsdError::SchemaParse(format_structured_errors(errors)))?;

        trace!("compiled xsd schema");
        Ok(Self {
            context,
            _schema_document: schema_document,
        })
    }

    /// Check a document against the compiled schema.
    ///
    /// Returns `Ok(false)` when the document parses but violates the schema.
    pub fn is_valid(&mut self, document: &XmlSource<'_>) -> Result<bool> {
        let document = parse_source(document).map_err(XsdError::DocumentParse)?;

        match self.context.validate_document(&document) {
            Ok(()) => Ok(true),
            Err(violations) => {
                trace!(violations = violations.len(), "document does not conform");
                Ok(false)
            }
        }
    }
}

fn is_composition(node: &Node) -> bool {
    COMPOSITION_ELEMENTS.contains(&node.get_name().as_str())
        && node
            .get_namespace()
            .map(|ns| ns.get_href() == XSD_NAMESPACE)
            .unwrap_or(false)
}

/// Check each composition `schemaLocation` under `node` against the policy
/// and descend into the schemas it names.
///
/// Locations in the top-level schema are rewritten to the checked absolute
/// path, so libxml2 loads exactly that file. Nested schemas are only read,
/// libxml2 resolves their locations against their own directory, as here.
fn confine_locations(
    node: &Node,
    base_dir: Option<&Path>,
    references: &ReferencePolicy,
    visited: &mut HashSet<PathBuf>,
    rewrite: bool,
) -> Result<()> {
    for mut child in node.get_child_elements() {
        if is_composition(&child) {
            if let Some(location) = child.get_attribute("schemaLocation") {
                let path = references.resolve_location(base_dir, &location)?;
                if rewrite {
                    child
                        .set_attribute("schemaLocation", location_str(&path)?)
                        .map_err(|e| XsdError::Reference(format!("{}: {}", location, e)))?;
                }
                if visited.insert(path.clone()) {
                    let nested = parse_source(&XmlSource::Location(path.clone()))
                        .map_err(XsdError::SchemaParse)?;
                    if let Some(nested_root) = nested.get_root_element() {
                        confine_locations(
                            &nested_root,
                            path.parent(),
                            references,
                            visited,
                            false,
                        )?;
                    }
                }
            }
        }
        confine_locations(&child, base_dir, references, visited, rewrite)?;
    }
    Ok(())
}
