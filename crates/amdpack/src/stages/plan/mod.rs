mod dependency_trigger;
mod global_excludes;
mod module_config;
mod paths_config;

use futures::future::try_join_all;

use amdpack_common::{
  EngineConfig, ExtensionLocator, ModuleId, ModuleType, NormalizedBundlerOptions, ResolveOptions,
};
use amdpack_error::BuildResult;
use amdpack_fs::OsFileSystem;
use amdpack_resolver::Resolver;
use amdpack_utils::indexmap::FxIndexMap;

pub use self::dependency_trigger::create_dependency_trigger;

/// The alias table a dependency publishes, next to the dependency name.
pub type DependencyAliases = (String, FxIndexMap<String, String>);

/// Builds the engine configuration: which module goes in which bundle.
///
/// A stage lives for one planning call, so do the directory walks its resolver caches.
pub struct PlanStage<'a> {
  fs: OsFileSystem,
  options: &'a NormalizedBundlerOptions,
  locator: &'a dyn ExtensionLocator,
  resolver: Resolver,
}

impl<'a> PlanStage<'a> {
  pub fn new(
    fs: OsFileSystem,
    options: &'a NormalizedBundlerOptions,
    locator: &'a dyn ExtensionLocator,
  ) -> Self {
    Self { fs, options, locator, resolver: Resolver::new(fs) }
  }

  pub async fn plan(&self) -> BuildResult<EngineConfig> {
    let dependency_aliases = self.load_dependency_aliases().await?;

    let mut shared_excludes = self.create_global_excludes().await?;
    shared_excludes.extend(self.create_dependency_alias_excludes(&dependency_aliases).await?);
    tracing::debug!(count = shared_excludes.len(), "Global excludes resolved");

    let modules = try_join_all(
      self.options.bundles.iter().map(|bundle| self.create_module_config(bundle, &shared_excludes)),
    )
    .await?;

    let amd = &self.options.amd;
    let mut config = EngineConfig::new(amd.base_url.clone(), self.options.work_dir.clone());
    config.paths = self.create_paths_config(&dependency_aliases);
    config.shim = amd.shim.clone();
    config.packages = amd.packages.clone();
    config.modules = modules;

    Ok(config)
  }

  async fn load_dependency_aliases(&self) -> BuildResult<Vec<DependencyAliases>> {
    let dependencies = &self.options.dependencies;
    let tables = try_join_all(
      dependencies.iter().map(|dependency| self.locator.dependency_aliases(&dependency.name)),
    )
    .await?;

    Ok(dependencies.iter().map(|dependency| dependency.name.clone()).zip(tables).collect())
  }

  /// Resolves the target extension patterns, ie. the bundle includes.
  fn target_resolve_options(&self) -> ResolveOptions {
    let extension = &self.options.extension;
    ResolveOptions::new(&extension.name, &extension.path)
      .with_extension_prefix(!extension.is_root)
      .with_dependencies(self.options.dependency_names())
  }

  async fn resolve_patterns(
    &self,
    patterns: &[String],
    options: &ResolveOptions,
  ) -> BuildResult<Vec<ModuleId>> {
    let resolved =
      try_join_all(patterns.iter().map(|pattern| self.resolver.resolve(pattern, options))).await?;
    Ok(resolved.into_iter().flatten().collect())
  }

  /// Same as `resolve_patterns`, for every module type.
  async fn resolve_patterns_of_all_types(
    &self,
    patterns: &[String],
    options: &ResolveOptions,
  ) -> BuildResult<Vec<ModuleId>> {
    let options = ModuleType::ALL.map(|module_type| options.clone().with_type(module_type));
    let resolved =
      try_join_all(options.iter().map(|options| self.resolve_patterns(patterns, options))).await?;
    Ok(resolved.into_iter().flatten().collect())
  }
}
