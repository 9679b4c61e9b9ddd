use std::sync::Arc;

use amdpack_common::{
  BundleReport, BundlerOptions, EngineConfig, ExtensionLocator, NormalizedBundlerOptions,
  TransformedBundle,
};
use amdpack_error::{BuildResult, PackError};
use amdpack_fs::OsFileSystem;

use crate::{
  stages::{
    plan::PlanStage,
    report::{parse_build_log::parse_build_log, validate_reports::validate_reports},
    transform::{compressor::Compressor, TransformStage},
  },
  types::{SharedEngine, SharedLocator, SharedOptions},
  utils::normalize_options::normalize_options,
  BundleEngine,
};

pub struct Bundler {
  pub(crate) fs: OsFileSystem,
  pub(crate) options: SharedOptions,
  pub(crate) locator: SharedLocator,
  pub(crate) engine: SharedEngine,
}

impl Bundler {
  pub fn new(
    options: BundlerOptions,
    locator: impl ExtensionLocator + 'static,
    engine: impl BundleEngine + 'static,
  ) -> BuildResult<Self> {
    let options = normalize_options(options, &locator)?;

    Ok(Bundler {
      fs: OsFileSystem,
      options: Arc::new(options),
      locator: Arc::new(locator),
      engine: Arc::new(engine),
    })
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  /// The configuration handed over to the engine, without running it.
  pub async fn create_engine_config(&self) -> BuildResult<EngineConfig> {
    PlanStage::new(self.fs, &self.options, self.locator.as_ref()).plan().await
  }

  /// Bundles the extension and reports what went into each bundle.
  ///
  /// Fails as a whole: on a resolution error, an engine error or a bundle shipping a module the
  /// extension does not own.
  pub async fn plan(&self) -> BuildResult<Vec<BundleReport>> {
    let config = self.create_engine_config().await?;
    tracing::debug!(
      extension = %self.options.extension.name,
      bundles = config.modules.len(),
      "Starting the bundling engine"
    );

    let log = self
      .engine
      .optimize(&config)
      .await
      .map_err(|err| PackError::Engine(format!("{err:#}")))?;

    let reports = parse_build_log(&log);
    validate_reports(&self.options, &reports)?;

    for report in &reports {
      tracing::info!("{} bundled with {} modules", report.title, report.content.len());
      tracing::debug!(content = ?report.content, "{}", report.title);
    }

    Ok(reports)
  }

  /// Publishes the bundles the engine wrote into the work directory.
  pub async fn transform(
    &self,
    compressor: &dyn Compressor,
  ) -> BuildResult<Vec<TransformedBundle>> {
    TransformStage::new(self.fs, &self.options, compressor).transform().await
  }
}
