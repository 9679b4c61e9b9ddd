use std::path::PathBuf;

use amdpack_utils::indexmap::FxIndexMap;

use crate::ModuleType;

/// Options of a single pattern resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
  /// The extension the modules belong to, ie. `taoQtiTest`.
  pub target_extension: String,
  /// Sibling extensions, their modules never get the target namespace.
  pub dependencies: Vec<String>,
  /// Do we prefix the found modules with the extension name?
  pub extension_prefix: bool,
  /// The root of the scan, ie. `/home/foo/project/taoQtiTest/views/js`.
  pub cwd: PathBuf,
  pub module_type: ModuleType,
  /// Directory names skipped at any depth.
  pub exclude_dirs: Vec<String>,
  /// Alias prefix to real path prefix.
  pub aliases: FxIndexMap<String, String>,
}

impl Default for ResolveOptions {
  fn default() -> Self {
    Self {
      target_extension: String::new(),
      dependencies: vec![],
      extension_prefix: true,
      cwd: PathBuf::new(),
      module_type: ModuleType::Js,
      exclude_dirs: vec!["loader".to_string(), "test".to_string()],
      aliases: FxIndexMap::default(),
    }
  }
}

impl ResolveOptions {
  pub fn new(target_extension: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
    Self { target_extension: target_extension.into(), cwd: cwd.into(), ..Default::default() }
  }

  #[must_use]
  pub fn with_type(mut self, module_type: ModuleType) -> Self {
    self.module_type = module_type;
    self
  }

  #[must_use]
  pub fn with_extension_prefix(mut self, value: bool) -> Self {
    self.extension_prefix = value;
    self
  }

  #[must_use]
  pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
    self.dependencies = dependencies;
    self
  }

  #[must_use]
  pub fn with_exclude_dirs(mut self, exclude_dirs: Vec<String>) -> Self {
    self.exclude_dirs = exclude_dirs;
    self
  }

  #[must_use]
  pub fn with_aliases(mut self, aliases: FxIndexMap<String, String>) -> Self {
    self.aliases = aliases;
    self
  }
}
