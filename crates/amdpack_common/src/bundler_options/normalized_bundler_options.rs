use std::path::PathBuf;

use amdpack_utils::indexmap::FxIndexMap;

use crate::{AmdConfig, BundleSpec, ExtensionDescriptor};

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Extensions
  pub extension: ExtensionDescriptor,
  pub root_extension: ExtensionDescriptor,
  /// Declared dependencies, without the target and without the root extension.
  pub dependencies: Vec<ExtensionDescriptor>,

  // --- Amd
  pub amd: AmdConfig,
  pub paths: FxIndexMap<String, String>,
  pub allow_external: Vec<String>,

  // --- Output
  pub work_dir: PathBuf,
  pub output_dir: String,
  pub bundles: Vec<BundleSpec>,
}

impl NormalizedBundlerOptions {
  pub fn is_root_extension(&self) -> bool {
    self.extension.is_root
  }

  /// The extensions whose sources must stay out of the target bundles.
  pub fn excluded_extensions(&self) -> impl Iterator<Item = &ExtensionDescriptor> {
    let root = (!self.is_root_extension()).then_some(&self.root_extension);
    root.into_iter().chain(self.dependencies.iter())
  }

  /// Names used to detect modules that already carry a foreign namespace.
  pub fn dependency_names(&self) -> Vec<String> {
    self.dependencies.iter().map(|extension| extension.name.clone()).collect()
  }

  /// Engine module id of a bundle, ie. `taoQtiTest/loader/taoQtiTest.bundle`.
  pub fn bundle_destination(&self, bundle: &BundleSpec) -> String {
    self.extension.loader_module(&self.output_dir, &format!("{}.bundle", bundle.name))
  }
}
