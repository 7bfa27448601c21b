//! Public (download / display) filenames.
//!
//! The name is `"<YYYY-MM-DD> <title>"`, followed by `.<ext>` when the MIME
//! type has a canonical extension. Nothing here touches the filesystem and
//! the title is not escaped; callers writing the name to a raw filesystem
//! must sanitise it themselves.

use chrono::{DateTime, Utc};

use crate::mime::MimeTypeRegistry;

/// Build the public filename using the default MIME registry.
pub fn public_filename(
  title: &str,
  created: DateTime<Utc>,
  mime_type: &str,
) -> String {
  public_filename_with(&MimeTypeRegistry::default(), title, created, mime_type)
}

/// Build the public filename against a specific registry.
pub fn public_filename_with(
  registry: &MimeTypeRegistry,
  title: &str,
  created: DateTime<Utc>,
  mime_type: &str,
) -> String {
  let mut name = format!("{} {title}", created.format("%Y-%m-%d"));
  if let Some(ext) = registry.extension_for(mime_type) {
    name.push('.');
    name.push_str(ext);
  }
  name
}
