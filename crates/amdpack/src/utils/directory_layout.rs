use std::{io, path::PathBuf};

use anyhow::Context;
use futures::future::BoxFuture;

use amdpack_common::ExtensionLocator;
use amdpack_utils::indexmap::FxIndexMap;

/// The conventional layout of a project, one directory per extension:
///
/// - `<root>/<extension>/views/js` for scripts, templates and JSON files
/// - `<root>/<extension>/views/css` for stylesheets
/// - `<root>/<extension>/views/build/grunt/paths.json` for the aliases it publishes
#[derive(Debug, Clone)]
pub struct DirectoryLayout {
  root: PathBuf,
}

impl DirectoryLayout {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn alias_table_path(&self, extension: &str) -> PathBuf {
    self.root.join(extension).join("views/build/grunt/paths.json")
  }
}

impl ExtensionLocator for DirectoryLayout {
  fn extension_path(&self, extension: &str) -> PathBuf {
    self.root.join(extension).join("views/js")
  }

  fn extension_css_path(&self, extension: &str) -> PathBuf {
    self.root.join(extension).join("views/css")
  }

  fn dependency_aliases<'a>(
    &'a self,
    extension: &'a str,
  ) -> BoxFuture<'a, anyhow::Result<FxIndexMap<String, String>>> {
    Box::pin(async move {
      let file = self.alias_table_path(extension);
      let content = match tokio::fs::read_to_string(&file).await {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(FxIndexMap::default()),
        Err(err) => {
          return Err(err).with_context(|| format!("Unable to read {}", file.display()));
        }
      };
      serde_json::from_str(&content).with_context(|| format!("Invalid alias table {}", file.display()))
    })
  }
}
