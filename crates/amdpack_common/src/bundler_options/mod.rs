pub mod amd_config;
pub mod bundle_spec;
pub mod module_type;
pub mod normalized_bundler_options;
pub mod resolve_options;

use std::path::PathBuf;

use amdpack_utils::indexmap::FxIndexMap;
use serde::Deserialize;

use crate::{AmdConfig, BundleSpec};

/// Raw options, as written in a bundle configuration file.
///
/// Every field is optional, `normalize_options` fills in the defaults.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerOptions {
  // --- Extensions
  pub cwd: Option<PathBuf>,
  pub extension: Option<String>,
  pub root_extension: Option<String>,
  pub dependencies: Option<Vec<String>>,

  // --- Amd
  pub amd: Option<AmdConfig>,
  pub paths: Option<FxIndexMap<String, String>>,
  pub allow_external: Option<Vec<String>>,

  // --- Output
  pub work_dir: Option<PathBuf>,
  pub output_dir: Option<String>,
  pub bundles: Option<Vec<BundleSpec>>,
}
