use std::path::PathBuf;

use amdpack_utils::indexmap::FxIndexMap;
use futures::future::BoxFuture;

/// A pluggable unit of the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
  pub name: String,
  /// Where the scripts, templates and JSON files live.
  pub path: PathBuf,
  /// Where the stylesheets live, this directory may not exist.
  pub css_path: PathBuf,
  /// The root extension modules are referenced without namespace.
  pub is_root: bool,
}

impl ExtensionDescriptor {
  /// Namespace of the stylesheets, ie. `taoQtiTestCss`.
  pub fn css_namespace(&self) -> String {
    format!("{}Css", self.name)
  }

  /// Id of a module generated into the extension loader directory.
  pub fn loader_module(&self, output_dir: &str, file: &str) -> String {
    if self.is_root {
      format!("{output_dir}/{file}")
    } else {
      format!("{}/{output_dir}/{file}", self.name)
    }
  }
}

/// Locates extensions on disk and the alias tables they publish.
pub trait ExtensionLocator: Send + Sync {
  fn extension_path(&self, extension: &str) -> PathBuf;

  fn extension_css_path(&self, extension: &str) -> PathBuf;

  /// The alias table a dependency exposes to its dependents. Empty by default.
  fn dependency_aliases<'a>(
    &'a self,
    _extension: &'a str,
  ) -> BoxFuture<'a, anyhow::Result<FxIndexMap<String, String>>> {
    Box::pin(async { Ok::<_, anyhow::Error>(FxIndexMap::default()) })
  }

  fn describe(&self, extension: &str, root_extension: &str) -> ExtensionDescriptor {
    ExtensionDescriptor {
      name: extension.to_string(),
      path: self.extension_path(extension),
      css_path: self.extension_css_path(extension),
      is_root: extension == root_extension,
    }
  }
}

#[test]
fn test_loader_module() {
  let mut extension = ExtensionDescriptor {
    name: "extB".to_string(),
    path: PathBuf::from("extB/views/js"),
    css_path: PathBuf::from("extB/views/css"),
    is_root: false,
  };
  assert_eq!(extension.loader_module("loader", "extB.min"), "extB/loader/extB.min");
  assert_eq!(extension.css_namespace(), "extBCss");
  extension.is_root = true;
  assert_eq!(extension.loader_module("loader", "extB.min"), "loader/extB.min");
}
