use std::path::PathBuf;

use amdpack_utils::indexmap::FxIndexMap;
use serde::Serialize;

use crate::{ModuleId, PackageConfig};

/// The build configuration handed over to the bundling engine.
///
/// Serialized in the r.js build file format.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
  pub log_level: u8,
  // The engine never optimizes, the transform stage does.
  pub optimize: String,
  pub preserve_license_comments: bool,
  pub remove_combined: bool,
  pub find_nested_dependencies: bool,
  pub skip_dir_optimize: bool,
  pub optimize_css: String,
  pub build_css: bool,
  pub inline_text: bool,
  pub skip_pragmas: bool,
  pub generate_source_maps: bool,

  pub base_url: PathBuf,
  pub paths: FxIndexMap<String, String>,
  pub shim: FxIndexMap<String, serde_json::Value>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub packages: Vec<PackageConfig>,
  pub dir: PathBuf,
  pub modules: Vec<EngineModule>,
}

impl EngineConfig {
  pub fn new(base_url: PathBuf, dir: PathBuf) -> Self {
    Self {
      log_level: 0,
      optimize: "none".to_string(),
      preserve_license_comments: false,
      remove_combined: false,
      find_nested_dependencies: false,
      skip_dir_optimize: true,
      optimize_css: "none".to_string(),
      build_css: false,
      inline_text: true,
      skip_pragmas: true,
      generate_source_maps: true,
      base_url,
      paths: FxIndexMap::default(),
      shim: FxIndexMap::default(),
      packages: vec![],
      dir,
      modules: vec![],
    }
  }
}

/// One target bundle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineModule {
  pub name: String,
  pub create: bool,
  pub include: Vec<ModuleId>,
  /// Removes exactly these modules, their dependencies are still pulled in.
  pub exclude_shallow: Vec<ModuleId>,
  /// Removes these modules and everything they depend on.
  pub exclude: Vec<String>,
  #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
  pub override_config: Option<ModuleOverride>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleOverride {
  pub wrap: Wrap,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Wrap {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end: Option<String>,
}

impl EngineModule {
  /// The code appended to the bundle, if any.
  pub fn wrap_end(&self) -> Option<&str> {
    self.override_config.as_ref().and_then(|config| config.wrap.end.as_deref())
  }
}
