use std::path::PathBuf;

use thiserror::Error;

/// The failures the planner can report, carried inside `anyhow::Error`.
#[derive(Error, Debug)]
pub enum PackError {
  /// A module type name outside of the supported table.
  #[error("Unsupported module type '{name}', please select one in {supported}.")]
  UnsupportedModuleType { name: String, supported: String },

  #[error("Unable to resolve the modules matching '{pattern}' from {}", cwd.display())]
  Resolution {
    pattern: String,
    cwd: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A bundled module is outside of what the extension is allowed to ship.
  #[error(
    "The bundle {bundle} contains a forbidden dependency '{module}'. Check your entry points, includes and excludes, or allow it explicitly."
  )]
  PolicyViolation { bundle: String, module: String },

  #[error("The bundling engine failed: {0}")]
  Engine(String),

  #[error("Unable to access {} or {}", bundle.display(), source_map.display())]
  MissingBundleArtifact { bundle: PathBuf, source_map: PathBuf },
}
