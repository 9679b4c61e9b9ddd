use std::path::PathBuf;

use sugar_path::SugarPath;

use amdpack_common::{BundlerOptions, ExtensionLocator, NormalizedBundlerOptions};
use amdpack_error::BuildResult;
use amdpack_utils::indexmap::FxIndexSet;

pub fn normalize_options(
  raw_options: BundlerOptions,
  locator: &dyn ExtensionLocator,
) -> BuildResult<NormalizedBundlerOptions> {
  let Some(extension) = raw_options.extension.filter(|name| !name.is_empty()) else {
    return Err(anyhow::anyhow!("You must supply options.extension to amdpack").into());
  };

  let cwd = match raw_options.cwd {
    Some(cwd) => cwd,
    None => std::env::current_dir().map_err(anyhow::Error::from)?,
  };

  // Without root extension, the target is the root.
  let root_extension = raw_options.root_extension.unwrap_or_else(|| extension.clone());

  let dependencies = raw_options
    .dependencies
    .unwrap_or_default()
    .into_iter()
    .filter(|dependency| *dependency != extension && *dependency != root_extension)
    .collect::<FxIndexSet<_>>()
    .into_iter()
    .map(|dependency| locator.describe(&dependency, &root_extension))
    .collect();

  let extension = locator.describe(&extension, &root_extension);
  let root_extension = locator.describe(&root_extension, &root_extension);

  let mut amd = raw_options.amd.unwrap_or_default();
  amd.base_url = if amd.base_url.as_os_str().is_empty() {
    root_extension.path.clone()
  } else {
    amd.base_url.absolutize_with(cwd.clone())
  };

  let work_dir =
    raw_options.work_dir.unwrap_or_else(|| PathBuf::from("output")).absolutize_with(cwd.clone());

  Ok(NormalizedBundlerOptions {
    extension,
    root_extension,
    dependencies,
    amd,
    paths: raw_options.paths.unwrap_or_default(),
    allow_external: raw_options.allow_external.unwrap_or_default(),
    work_dir,
    output_dir: raw_options.output_dir.unwrap_or_else(|| "loader".to_string()),
    bundles: raw_options.bundles.unwrap_or_default(),
  })
}
