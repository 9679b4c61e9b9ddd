pub mod compressor;

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures::future::try_join_all;
use sugar_path::SugarPath;

use amdpack_common::{BundleSpec, NormalizedBundlerOptions, TransformedBundle};
use amdpack_error::{BuildResult, PackError};
use amdpack_fs::{FileSystem, OsFileSystem};
use amdpack_sourcemap::{fix_module_create, resolve_css_paths};
use amdpack_utils::{indexmap::FxIndexMap, path_ext::PathExt};

use self::compressor::{CompressInput, Compressor};

/// Publishes the engine output: `<workDir>/<ext>/loader/<name>.bundle.js` becomes
/// `<ext path>/loader/<name>.min.js`, along with its source map.
pub struct TransformStage<'a> {
  fs: OsFileSystem,
  options: &'a NormalizedBundlerOptions,
  compressor: &'a dyn Compressor,
}

impl<'a> TransformStage<'a> {
  pub fn new(
    fs: OsFileSystem,
    options: &'a NormalizedBundlerOptions,
    compressor: &'a dyn Compressor,
  ) -> Self {
    Self { fs, options, compressor }
  }

  pub async fn transform(&self) -> BuildResult<Vec<TransformedBundle>> {
    try_join_all(self.options.bundles.iter().map(|bundle| self.transform_bundle(bundle))).await
  }

  async fn transform_bundle(&self, bundle: &BundleSpec) -> BuildResult<TransformedBundle> {
    let options = self.options;
    let src = options.work_dir.join(format!("{}.js", options.bundle_destination(bundle)));
    let src_map = with_map_suffix(&src);
    let dest_dir = options.extension.path.join(&options.output_dir);
    let dest = dest_dir.join(format!("{}.min.js", bundle.name));
    let dest_map = with_map_suffix(&dest);

    if !self.fs.exists(&src) || !self.fs.exists(&src_map) {
      Err(PackError::MissingBundleArtifact { bundle: src.clone(), source_map: src_map.clone() })?;
    }

    let code = tokio::fs::read_to_string(&src).await.map_err(anyhow::Error::from)?;
    let raw_map = tokio::fs::read_to_string(&src_map).await.map_err(anyhow::Error::from)?;
    let source_map = fix_module_create(&raw_map)
      .with_context(|| format!("Invalid source map {}", src_map.display()))?;
    if source_map != raw_map {
      // External compressors read the map from disk.
      tokio::fs::write(&src_map, &source_map).await.map_err(anyhow::Error::from)?;
    }

    self.fs.create_dir_all(&dest_dir).map_err(anyhow::Error::from)?;
    let output = self
      .compressor
      .compress(CompressInput {
        bundle: &bundle.name,
        method: bundle.transform_method(),
        code,
        source_map,
        input: &src,
        input_map: &src_map,
        output: &dest,
        output_map: &dest_map,
      })
      .await
      .with_context(|| format!("Unable to transform the bundle {}", bundle.name))?;

    let (code, map) = match self.css_source_map_path(&dest_dir) {
      Some(css_path) => {
        let resolved = resolve_css_paths(&output.map, &output.code, &self.css_aliases(), &css_path);
        resolved.map_or((output.code, output.map), |resolved| (resolved.code, resolved.map))
      }
      None => (output.code, output.map),
    };

    tokio::fs::write(&dest, code).await.map_err(anyhow::Error::from)?;
    tokio::fs::write(&dest_map, map).await.map_err(anyhow::Error::from)?;

    tracing::info!(
      src = %src.display(),
      dest = %dest.display(),
      method = %output.method,
      "Bundle transformed"
    );

    Ok(TransformedBundle { src, dest, source_map: dest_map, method: output.method })
  }

  /// The stylesheets directory, relative to the published bundle.
  fn css_source_map_path(&self, dest_dir: &Path) -> Option<String> {
    let css_path = &self.options.extension.css_path;
    self.fs.is_dir(css_path).then(|| css_path.relative(dest_dir).to_slash_string())
  }

  fn css_aliases(&self) -> FxIndexMap<String, String> {
    let mut aliases = self.options.amd.paths.clone();
    aliases.extend(self.options.paths.iter().map(|(alias, path)| (alias.clone(), path.clone())));
    aliases
  }
}

fn with_map_suffix(file: &Path) -> PathBuf {
  let mut map = file.as_os_str().to_os_string();
  map.push(".map");
  PathBuf::from(map)
}

#[test]
fn test_with_map_suffix() {
  assert_eq!(
    with_map_suffix(Path::new("output/extB/loader/extB.bundle.js")),
    PathBuf::from("output/extB/loader/extB.bundle.js.map")
  );
}
