pub mod command;

use futures::future::BoxFuture;

use amdpack_common::EngineConfig;

/// The AMD optimizer walking the dependency graph, ie. r.js.
///
/// It receives the whole build configuration at once and answers with its build log: one block
/// per bundle, the bundle file first, then a dashed line, then the files it contains in
/// dependency order.
pub trait BundleEngine: Send + Sync {
  fn optimize<'a>(&'a self, config: &'a EngineConfig) -> BoxFuture<'a, anyhow::Result<String>>;
}
