//! Runtime configuration, read from `docket.toml` and `DOCKET_*` variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use docket_core::paths::StorageConfig;
use serde::Deserialize;

/// Shape of the configuration file.
///
/// ```toml
/// store_path = "~/.local/share/docket/docket.sqlite3"
///
/// [storage]
/// originals_dir = "~/.local/share/docket/originals"
/// thumbnail_dir = "~/.local/share/docket/thumbnails"
/// ```
#[derive(Debug, Deserialize, Clone)]
pub struct DocketConfig {
  pub store_path: PathBuf,
  pub storage:    StorageConfig,
}

impl DocketConfig {
  /// Layer the (optional) file at `path` under `DOCKET_`-prefixed environment
  /// variables; nested keys use `__`, e.g. `DOCKET_STORAGE__ORIGINALS_DIR`.
  pub fn load(path: &Path) -> anyhow::Result<Self> { Self::load_from(path, None) }

  /// As [`load`](Self::load), reading variables from `env` instead of the
  /// process environment when it is given.
  fn load_from(path: &Path, env: Option<config::Map<String, String>>) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(
        config::Environment::with_prefix("DOCKET")
          .prefix_separator("_")
          .separator("__")
          .source(env),
      )
      .build()
      .context("failed to read config file")?;

    let cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise DocketConfig")?;

    Ok(cfg.expanded())
  }

  fn expanded(self) -> Self {
    Self {
      store_path: expand_tilde(&self.store_path),
      storage:    StorageConfig {
        originals_dir: expand_tilde(&self.storage.originals_dir),
        thumbnail_dir: expand_tilde(&self.storage.thumbnail_dir),
      },
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  match std::env::var_os("HOME") {
    Some(home) => expand_tilde_in(path, Path::new(&home)),
    None => path.to_path_buf(),
  }
}

fn expand_tilde_in(path: &Path, home: &Path) -> PathBuf {
  // Component-wise, so `~user/...` is left alone.
  match path.strip_prefix("~") {
    Ok(rest) => home.join(rest),
    Err(_) => path.to_path_buf(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loads_nested_storage_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docket.toml");
    std::fs::write(
      &path,
      r#"
store_path = "/var/lib/docket/docket.sqlite3"

[storage]
originals_dir = "/var/lib/docket/originals"
thumbnail_dir = "/var/lib/docket/thumbnails"
"#,
    )
    .unwrap();

    let cfg = DocketConfig::load(&path).unwrap();

    assert_eq!(cfg.store_path, Path::new("/var/lib/docket/docket.sqlite3"));
    assert_eq!(cfg.storage.originals_dir, Path::new("/var/lib/docket/originals"));
    assert_eq!(cfg.storage.thumbnail_dir, Path::new("/var/lib/docket/thumbnails"));
  }

  #[test]
  fn environment_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docket.toml");
    std::fs::write(
      &path,
      r#"
store_path = "/var/lib/docket/docket.sqlite3"

[storage]
originals_dir = "/var/lib/docket/originals"
thumbnail_dir = "/var/lib/docket/thumbnails"
"#,
    )
    .unwrap();
    let env = config::Map::from([
      ("DOCKET_STORAGE__ORIGINALS_DIR".to_owned(), "/mnt/archive/originals".to_owned()),
      ("DOCKET_STORE_PATH".to_owned(), "/mnt/archive/docket.sqlite3".to_owned()),
    ]);

    let cfg = DocketConfig::load_from(&path, Some(env)).unwrap();

    assert_eq!(cfg.store_path, Path::new("/mnt/archive/docket.sqlite3"));
    assert_eq!(cfg.storage.originals_dir, Path::new("/mnt/archive/originals"));
    assert_eq!(cfg.storage.thumbnail_dir, Path::new("/var/lib/docket/thumbnails"));
  }

  #[test]
  fn environment_alone_is_enough_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let env = config::Map::from([
      ("DOCKET_STORE_PATH".to_owned(), "/srv/docket.sqlite3".to_owned()),
      ("DOCKET_STORAGE__ORIGINALS_DIR".to_owned(), "/srv/originals".to_owned()),
      ("DOCKET_STORAGE__THUMBNAIL_DIR".to_owned(), "/srv/thumbnails".to_owned()),
    ]);

    let cfg = DocketConfig::load_from(&dir.path().join("missing.toml"), Some(env)).unwrap();

    assert_eq!(cfg.storage.thumbnail_dir, Path::new("/srv/thumbnails"));
  }

  #[test]
  fn missing_required_key_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = DocketConfig::load_from(&dir.path().join("missing.toml"), Some(config::Map::new()));
    assert!(result.is_err());
  }

  #[test]
  fn leading_tilde_is_expanded_to_home() {
    let home = Path::new("/home/ada");

    assert_eq!(expand_tilde_in(Path::new("~/docket/originals"), home), home.join("docket/originals"));
    assert_eq!(expand_tilde_in(Path::new("~"), home), home);
    assert_eq!(expand_tilde_in(Path::new("~bob/docs"), home), Path::new("~bob/docs"));
    assert_eq!(expand_tilde_in(Path::new("/srv/~/x"), home), Path::new("/srv/~/x"));
  }

  #[test]
  fn expand_tilde_uses_home_variable() {
    let Some(home) = std::env::var_os("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x")), Path::new(&home).join("x"));
  }

  #[test]
  fn absolute_paths_are_not_expanded() {
    assert_eq!(expand_tilde(Path::new("/srv/docket")), Path::new("/srv/docket"));
    assert_eq!(expand_tilde(Path::new("relative/dir")), Path::new("relative/dir"));
  }
}
