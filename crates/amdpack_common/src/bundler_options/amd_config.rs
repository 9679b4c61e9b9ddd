use std::path::PathBuf;

use amdpack_utils::indexmap::FxIndexMap;
use serde::{Deserialize, Serialize};

/// The AMD configuration shared by every bundle, same as the runtime loader config.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmdConfig {
  pub base_url: PathBuf,
  pub paths: FxIndexMap<String, String>,
  pub shim: FxIndexMap<String, serde_json::Value>,
  /// Patterns of the third party libraries, shipped by the vendor bundle only.
  pub vendor: Vec<String>,
  pub bootstrap: Vec<String>,
  /// Conventional patterns of an extension, used by bundles flagged `default`.
  pub default: Vec<String>,
  pub exclude: Vec<String>,
  pub packages: Vec<PackageConfig>,
}

#[derive(Default, Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub main: Option<String>,
}
