use std::slice;

use amdpack_common::{BundleSpec, EngineModule, ModuleId, ModuleOverride, Wrap};
use amdpack_error::BuildResult;
use amdpack_utils::indexmap::FxIndexSet;

use super::{create_dependency_trigger, PlanStage};

impl PlanStage<'_> {
  /// Lists exhaustively what goes in and out of one bundle, the dependency tree is not trusted.
  ///
  /// Excludes are shallow: an excluded module is left out, its dependencies are not.
  pub(super) async fn create_module_config(
    &self,
    bundle: &BundleSpec,
    shared_excludes: &FxIndexSet<ModuleId>,
  ) -> BuildResult<EngineModule> {
    let amd = &self.options.amd;
    let target = self.target_resolve_options();

    let mut includes = FxIndexSet::default();
    let mut excludes = FxIndexSet::default();

    if bundle.vendor && !bundle.standalone {
      // The vendor bundle ships the third party libraries only.
      includes.extend(self.resolve_patterns(&amd.vendor, &target).await?);
    } else {
      if bundle.bootstrap || bundle.standalone {
        includes.extend(self.resolve_patterns(&amd.bootstrap, &target).await?);
      }
      if let Some(entry_point) = &bundle.entry_point {
        includes.extend(self.resolve_patterns(slice::from_ref(entry_point), &target).await?);
      }
      if bundle.default {
        includes.extend(self.resolve_patterns(&amd.default, &target).await?);
      }
      // Standalone bundles embed the whole tree, vendor libraries included.
      if bundle.vendor || bundle.standalone {
        includes.extend(self.resolve_patterns(&amd.vendor, &target).await?);
      } else {
        excludes.extend(self.resolve_patterns_of_all_types(&amd.vendor, &target).await?);
      }
    }

    includes.extend(self.resolve_patterns(&bundle.include, &target).await?);
    excludes.extend(self.resolve_patterns_of_all_types(&bundle.exclude, &target).await?);

    if !bundle.standalone {
      excludes.extend(shared_excludes.iter().cloned());
    }

    let include =
      includes.into_iter().filter(|module| !excludes.contains(module)).collect::<Vec<_>>();
    let name = self.options.bundle_destination(bundle);

    tracing::debug!(
      bundle = %name,
      include = include.len(),
      exclude_shallow = excludes.len(),
      exclude = bundle.exclude_nested.len(),
      "Bundle planned"
    );

    Ok(EngineModule {
      name,
      create: true,
      include,
      exclude_shallow: excludes.into_iter().collect(),
      exclude: bundle.exclude_nested.clone(),
      override_config: create_dependency_trigger(self.options, bundle)
        .map(|end| ModuleOverride { wrap: Wrap { start: None, end: Some(end) } }),
    })
  }
}
