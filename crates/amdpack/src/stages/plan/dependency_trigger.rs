use itertools::Itertools;

use amdpack_common::{BundleSpec, NormalizedBundlerOptions};

/// Code appended to a bundle so the loader fetches the bundles it relies on first.
///
/// Defaults to the minified bundles of the root extension and of every dependency. A bootstrap
/// bundle registers them globally, other bundles define their own module on top of them.
/// Standalone bundles carry everything, they need nothing.
pub fn create_dependency_trigger(
  options: &NormalizedBundlerOptions,
  bundle: &BundleSpec,
) -> Option<String> {
  if bundle.standalone {
    return None;
  }

  let dependencies = bundle.dependencies.clone().unwrap_or_else(|| {
    options
      .excluded_extensions()
      .map(|extension| {
        extension.loader_module(&options.output_dir, &format!("{}.min", extension.name))
      })
      .collect()
  });
  if dependencies.is_empty() {
    return None;
  }

  let list = format!("[{}]", dependencies.iter().map(|module| format!("'{module}'")).join(","));
  if bundle.bootstrap {
    Some(format!("\nwindow.bundles = (window.bundles || []).concat({list});\n"))
  } else {
    let destination = options.bundle_destination(bundle);
    Some(format!("\ndefine('{destination}', {list}, function(){{}});\n"))
  }
}
