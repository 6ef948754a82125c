use std::path::{Path, PathBuf};

use crate::errors::{Result, XsdError};

/// Where the engine reads an XML or XSD document from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlSource<'a> {
    /// Literal document text
    Inline(&'a str),
    /// File resolved inside the reference root
    Location(PathBuf),
}

/// Path form handed to libxml, which only accepts UTF-8 file names.
pub(crate) fn location_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| XsdError::Reference(format!("non UTF-8 path: {}", path.display())))
}

/// Decides whether `data` / `schema` values that are not inline text may be
/// read from disk, and from where.
#[derive(Debug, Clone, Default)]
pub struct ReferencePolicy {
    root: Option<PathBuf>,
}

impl ReferencePolicy {
    /// Only inline documents are accepted.
    pub const fn disabled() -> Self {
        Self { root: None }
    }

    /// References are resolved relative to `root` and may not leave it.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Classify a raw field value as inline text or a file reference.
    ///
    /// Text whose first non-whitespace character (after an optional byte order
    /// mark) is `<` is inline. Anything else names a file under the
    /// reference root.
    pub fn resolve<'a>(&self, raw: &'a str) -> Result<XmlSource<'a>> {
        if raw.trim_start_matches('\u{feff}').trim_start().starts_with('<') {
            return Ok(XmlSource::Inline(raw));
        }
        self.resolve_location(None, raw).map(XmlSource::Location)
    }

    /// Resolve a file reference against `base_dir`, or the root when `None`.
    ///
    /// The canonical result must exist and lie inside the root. Used for field
    /// values and for `schemaLocation`s found inside schemas.
    pub fn resolve_location(&self, base_dir: Option<&Path>, raw: &str) -> Result<PathBuf> {
        let root = self
            .root
            .as_deref()
            .ok_or_else(|| XsdError::Reference("file references are disabled".to_string()))?;

        let reference = raw.trim();
        if reference.is_empty() {
            return Err(XsdError::Reference("empty reference".to_string()));
        }

        let canonical_root = root.canonicalize().map_err(|e| {
            XsdError::Reference(format!("reference root {}: {}", root.display(), e))
        })?;
        let candidate = base_dir
            .unwrap_or(canonical_root.as_path())
            .join(reference)
            .canonicalize()
            .map_err(|e| XsdError::Reference(format!("{}: {}", reference, e)))?;

        if !candidate.starts_with(&canonical_root) {
            return Err(XsdError::Reference(format!(
                "{} escapes the reference root",
                reference
            )));
        }
        if !candidate.is_file() {
            return Err(XsdError::Reference(format!("{} is not a file", reference)));
        }

        Ok(candidate)
    }
}
