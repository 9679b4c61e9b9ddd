use futures::future::try_join_all;

use amdpack_common::{ExtensionDescriptor, ModuleId, ModuleType, ResolveOptions};
use amdpack_error::BuildResult;
use amdpack_utils::indexmap::FxIndexSet;

use super::{DependencyAliases, PlanStage};

const ALL_MODULES: &str = "**/*";

impl PlanStage<'_> {
  /// Every module of the root extension and of the dependencies, so a bundle never ships them.
  ///
  /// Modules already generated by a previous build, ie. `loader/vendor.min`, are left out.
  pub(super) async fn create_global_excludes(&self) -> BuildResult<FxIndexSet<ModuleId>> {
    let mut excludes = self
      .options
      .amd
      .exclude
      .iter()
      .map(|module| ModuleId::from(module.as_str()))
      .collect::<FxIndexSet<_>>();

    let dependency_names = self.options.dependency_names();
    let resolutions = self
      .options
      .excluded_extensions()
      .flat_map(|extension| extension_resolve_options(extension, &dependency_names))
      .collect::<Vec<_>>();

    let resolved = try_join_all(
      resolutions.iter().map(|options| self.resolver.resolve(ALL_MODULES, options)),
    )
    .await?;

    excludes.extend(resolved.into_iter().flatten().filter(|module| !is_generated(module)));
    Ok(excludes)
  }

  /// The aliases a dependency publishes can point anywhere, ie. to its vendored libraries, so
  /// whatever lives behind them is excluded too.
  pub(super) async fn create_dependency_alias_excludes(
    &self,
    dependency_aliases: &[DependencyAliases],
  ) -> BuildResult<Vec<ModuleId>> {
    let base_url = &self.options.amd.base_url;
    let resolutions = dependency_aliases.iter().filter(|(_, aliases)| !aliases.is_empty()).map(
      |(dependency, aliases)| async move {
        let options = ResolveOptions::new(dependency, base_url)
          .with_extension_prefix(false)
          .with_aliases(aliases.clone());
        let patterns =
          aliases.keys().map(|alias| format!("{alias}/{ALL_MODULES}")).collect::<Vec<_>>();
        self.resolve_patterns_of_all_types(&patterns, &options).await
      },
    );

    Ok(try_join_all(resolutions).await?.into_iter().flatten().collect())
  }
}

fn extension_resolve_options(
  extension: &ExtensionDescriptor,
  dependency_names: &[String],
) -> Vec<ResolveOptions> {
  let mut resolutions = ModuleType::ALL
    .iter()
    .map(|module_type| {
      ResolveOptions::new(&extension.name, &extension.path)
        .with_type(*module_type)
        .with_extension_prefix(!extension.is_root)
        .with_dependencies(dependency_names.to_vec())
    })
    .collect::<Vec<_>>();

  // A missing stylesheet directory simply holds no module.
  resolutions.push(
    ResolveOptions::new(extension.css_namespace(), &extension.css_path).with_type(ModuleType::Css),
  );
  resolutions
}

/// `loader/vendor.min` or `extB/loader/extB.bundle`
fn is_generated(module: &ModuleId) -> bool {
  module
    .rsplit('/')
    .next()
    .is_some_and(|file_name| file_name.ends_with(".min") || file_name.ends_with(".bundle"))
}

#[test]
fn test_is_generated() {
  assert!(is_generated(&ModuleId::from("loader/vendor.min")));
  assert!(is_generated(&ModuleId::from("extB/loader/extB.bundle")));
  assert!(!is_generated(&ModuleId::from("extB/min/a")));
  assert!(!is_generated(&ModuleId::from("json!extA/i18n/en.json")));
}
