//! MIME type to canonical file extension mapping.
//!
//! Lookups never fail. A type that is not in the table yields no extension,
//! whether it is a well-formed `type/subtype` the table does not know or a
//! string that is not a MIME type at all. [`MimeClass`] keeps the two apart
//! for callers that care.

/// The built-in table. Keys are lowercase MIME essences (no parameters).
const DEFAULT_TABLE: &[(&str, &str)] = &[
  ("application/json", "json"),
  ("application/msword", "doc"),
  ("application/pdf", "pdf"),
  ("application/rtf", "rtf"),
  ("application/vnd.oasis.opendocument.text", "odt"),
  (
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "docx",
  ),
  ("application/xml", "xml"),
  ("application/zip", "zip"),
  ("image/bmp", "bmp"),
  ("image/gif", "gif"),
  ("image/jpeg", "jpg"),
  ("image/png", "png"),
  ("image/svg+xml", "svg"),
  ("image/tiff", "tiff"),
  ("image/webp", "webp"),
  ("text/csv", "csv"),
  ("text/html", "html"),
  ("text/plain", "txt"),
];

/// The result of classifying a MIME type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeClass {
  /// Listed in the registry, with its canonical extension.
  Known(&'static str),
  /// Syntactically `type/subtype`, but not listed.
  UnknownSubtype,
  /// Empty, missing the `/`, or otherwise not a MIME type.
  Malformed,
}

impl MimeClass {
  pub fn extension(self) -> Option<&'static str> {
    match self {
      Self::Known(ext) => Some(ext),
      Self::UnknownSubtype | Self::Malformed => None,
    }
  }

  pub fn is_known(self) -> bool { matches!(self, Self::Known(_)) }
}

/// A static MIME type → extension table.
#[derive(Debug, Clone, Copy)]
pub struct MimeTypeRegistry {
  table: &'static [(&'static str, &'static str)],
}

impl Default for MimeTypeRegistry {
  fn default() -> Self { Self::new(DEFAULT_TABLE) }
}

impl MimeTypeRegistry {
  /// Build a registry over `table`. Keys must be lowercase essences.
  pub const fn new(table: &'static [(&'static str, &'static str)]) -> Self {
    Self { table }
  }

  /// Classify `mime_type`.
  ///
  /// Parameters (`; charset=...`) and surrounding whitespace are ignored and
  /// matching is case-insensitive.
  pub fn classify(&self, mime_type: &str) -> MimeClass {
    let essence = essence(mime_type);
    if !is_well_formed(&essence) {
      return MimeClass::Malformed;
    }
    self
      .table
      .iter()
      .find(|(mime, _)| *mime == essence.as_str())
      .map_or(MimeClass::UnknownSubtype, |&(_, ext)| MimeClass::Known(ext))
  }

  /// The canonical extension (without the dot), or `None` if the type is
  /// not known.
  pub fn extension_for(&self, mime_type: &str) -> Option<&'static str> {
    self.classify(mime_type).extension()
  }
}

/// Lowercased MIME type with parameters stripped.
fn essence(mime_type: &str) -> String {
  let base = mime_type.split(';').next().unwrap_or_default();
  base.trim().to_ascii_lowercase()
}

fn is_well_formed(essence: &str) -> bool {
  let Some((kind, subtype)) = essence.split_once('/') else {
    return false;
  };
  !kind.is_empty()
    && !subtype.is_empty()
    && !subtype.contains('/')
    && essence.chars().all(|c| c.is_ascii_graphic())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn classify(mime: &str) -> MimeClass { MimeTypeRegistry::default().classify(mime) }

  #[test]
  fn known_types_map_to_canonical_extensions() {
    assert_eq!(classify("application/pdf"), MimeClass::Known("pdf"));
    assert_eq!(classify("image/jpeg"), MimeClass::Known("jpg"));
    assert_eq!(classify("application/zip"), MimeClass::Known("zip"));
  }

  #[test]
  fn lookup_ignores_case_whitespace_and_parameters() {
    assert_eq!(classify("  Application/PDF "), MimeClass::Known("pdf"));
    assert_eq!(classify("text/plain; charset=utf-8"), MimeClass::Known("txt"));
  }

  #[test]
  fn mistyped_subtype_is_unknown() {
    assert_eq!(classify("image/jpegasd"), MimeClass::UnknownSubtype);
    assert_eq!(classify("application/x-unheard-of"), MimeClass::UnknownSubtype);
  }

  #[test]
  fn non_mime_strings_are_malformed() {
    for input in ["", "pdf", "/pdf", "image/", "a/b/c", "image/jp eg", ";charset=x"] {
      assert_eq!(classify(input), MimeClass::Malformed, "{input:?}");
    }
  }

  #[test]
  fn only_known_types_have_an_extension() {
    let registry = MimeTypeRegistry::default();
    assert_eq!(registry.extension_for("image/png"), Some("png"));
    assert_eq!(registry.extension_for("image/jpegasd"), None);
    assert_eq!(registry.extension_for("garbage"), None);
  }

  #[test]
  fn custom_table_replaces_defaults() {
    static TABLE: &[(&str, &str)] = &[("application/x-docket", "dkt")];
    let registry = MimeTypeRegistry::new(TABLE);

    assert_eq!(registry.extension_for("application/x-docket"), Some("dkt"));
    assert_eq!(registry.extension_for("application/pdf"), None);
  }
}
