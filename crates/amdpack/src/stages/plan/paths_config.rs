use amdpack_common::ExtensionDescriptor;
use amdpack_fs::FileSystem;
use amdpack_utils::{indexmap::FxIndexMap, path_ext::PathExt};

use super::{DependencyAliases, PlanStage};

impl PlanStage<'_> {
  /// The engine `paths`, later entries win:
  /// - the global aliases, then the extension ones
  /// - the target extension and its stylesheets, then the root extension
  /// - per dependency, the aliases it publishes, itself and its stylesheets
  pub(super) fn create_paths_config(
    &self,
    dependency_aliases: &[DependencyAliases],
  ) -> FxIndexMap<String, String> {
    let mut paths = self.options.amd.paths.clone();
    paths.extend(self.options.paths.iter().map(|(alias, path)| (alias.clone(), path.clone())));

    self.insert_extension_paths(&mut paths, &self.options.extension);
    if !self.options.is_root_extension() {
      let root = &self.options.root_extension;
      paths.insert(root.name.clone(), root.path.to_slash_string());
    }

    for (dependency, (_, aliases)) in self.options.dependencies.iter().zip(dependency_aliases) {
      paths.extend(aliases.iter().map(|(alias, path)| (alias.clone(), path.clone())));
      self.insert_extension_paths(&mut paths, dependency);
    }

    paths
  }

  fn insert_extension_paths(
    &self,
    paths: &mut FxIndexMap<String, String>,
    extension: &ExtensionDescriptor,
  ) {
    paths.insert(extension.name.clone(), extension.path.to_slash_string());
    if self.fs.is_dir(&extension.css_path) {
      paths.insert(extension.css_namespace(), extension.css_path.to_slash_string());
    }
  }
}
