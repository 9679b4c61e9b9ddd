mod bundler_options;
mod types;

pub use bundler_options::{
  amd_config::{AmdConfig, PackageConfig},
  bundle_spec::{BundleSpec, TransformMethod},
  module_type::ModuleType,
  normalized_bundler_options::NormalizedBundlerOptions,
  resolve_options::ResolveOptions,
  BundlerOptions,
};

pub use crate::types::{
  bundle_report::BundleReport,
  engine_config::{EngineConfig, EngineModule, ModuleOverride, Wrap},
  extension::{ExtensionDescriptor, ExtensionLocator},
  module_id::ModuleId,
  transformed_bundle::TransformedBundle,
};
