use std::path::Path;

use anyhow::Context;
use futures::future::BoxFuture;
use rustc_hash::FxHashMap;

use amdpack_common::TransformMethod;
use amdpack_utils::path_ext::PathExt;

/// A bundle and its source map, read from the engine work directory.
pub struct CompressInput<'a> {
  pub bundle: &'a str,
  pub method: TransformMethod,
  pub code: String,
  pub source_map: String,
  pub input: &'a Path,
  pub input_map: &'a Path,
  pub output: &'a Path,
  pub output_map: &'a Path,
}

#[derive(Debug)]
pub struct CompressOutput {
  pub code: String,
  pub map: String,
  /// The method actually applied.
  pub method: TransformMethod,
}

/// Turns a bundle into its published `.min.js` form.
pub trait Compressor: Send + Sync {
  fn compress<'a>(
    &'a self,
    input: CompressInput<'a>,
  ) -> BoxFuture<'a, anyhow::Result<CompressOutput>>;
}

/// Publishes the bundles as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughCompressor;

impl Compressor for PassThroughCompressor {
  fn compress<'a>(
    &'a self,
    input: CompressInput<'a>,
  ) -> BoxFuture<'a, anyhow::Result<CompressOutput>> {
    Box::pin(async move { Ok(pass_through(input)) })
  }
}

fn pass_through(input: CompressInput<'_>) -> CompressOutput {
  CompressOutput {
    code: input.code.replacen(".bundle.js.map", ".min.js.map", 1),
    map: input.source_map,
    method: TransformMethod::None,
  }
}

/// Runs one external command per transform method, ie. `uglifyjs {input} -o {output}`.
///
/// The placeholders `{input}`, `{map}`, `{output}` and `{outputMap}` are replaced by the bundle
/// paths. The command writes the output files, they are read back once it succeeds. Bundles
/// that opt out of the transform are passed through.
#[derive(Debug, Default, Clone)]
pub struct CommandCompressor {
  commands: FxHashMap<TransformMethod, Vec<String>>,
}

impl CommandCompressor {
  #[must_use]
  pub fn with_command(mut self, method: TransformMethod, command: Vec<String>) -> Self {
    self.commands.insert(method, command);
    self
  }

  /// Same as `with_command`, from a whitespace separated command line.
  #[must_use]
  pub fn with_command_line(self, method: TransformMethod, command: &str) -> Self {
    self.with_command(method, command.split_whitespace().map(ToString::to_string).collect())
  }
}

impl Compressor for CommandCompressor {
  fn compress<'a>(
    &'a self,
    input: CompressInput<'a>,
  ) -> BoxFuture<'a, anyhow::Result<CompressOutput>> {
    Box::pin(async move {
      if input.method == TransformMethod::None {
        return Ok(pass_through(input));
      }

      let Some((program, args)) =
        self.commands.get(&input.method).and_then(|command| command.split_first())
      else {
        anyhow::bail!("No command configured to {} the bundle {}", input.method, input.bundle);
      };

      let placeholders = [
        ("{input}", input.input.to_slash_string()),
        ("{map}", input.input_map.to_slash_string()),
        ("{output}", input.output.to_slash_string()),
        ("{outputMap}", input.output_map.to_slash_string()),
      ];
      let args = args.iter().map(|arg| {
        placeholders
          .iter()
          .fold(arg.clone(), |arg, (placeholder, path)| arg.replace(placeholder, path))
      });

      let status = tokio::process::Command::new(program)
        .args(args)
        .status()
        .await
        .with_context(|| format!("Unable to start {program}"))?;
      if !status.success() {
        anyhow::bail!("{program} exited with {status} while transforming {}", input.bundle);
      }

      let code = tokio::fs::read_to_string(input.output)
        .await
        .with_context(|| format!("{program} did not write {}", input.output.display()))?;
      let map = tokio::fs::read_to_string(input.output_map)
        .await
        .with_context(|| format!("{program} did not write {}", input.output_map.display()))?;

      Ok(CompressOutput { code, map, method: input.method })
    })
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  fn input<'a>(method: TransformMethod, paths: &'a [PathBuf; 4]) -> CompressInput<'a> {
    CompressInput {
      bundle: "extA",
      method,
      code: "define('a',[],function(){});\n//# sourceMappingURL=extA.bundle.js.map".to_string(),
      source_map: "{\"version\":3}".to_string(),
      input: &paths[0],
      input_map: &paths[1],
      output: &paths[2],
      output_map: &paths[3],
    }
  }

  #[tokio::test]
  async fn pass_through_renames_the_map() {
    let paths = [0, 1, 2, 3].map(|index| PathBuf::from(index.to_string()));
    let output =
      PassThroughCompressor.compress(input(TransformMethod::Minify, &paths)).await.unwrap();
    assert!(output.code.ends_with("//# sourceMappingURL=extA.min.js.map"));
    assert_eq!(output.map, "{\"version\":3}");
    assert_eq!(output.method, TransformMethod::None);
  }

  #[tokio::test]
  async fn missing_command() {
    let paths = [0, 1, 2, 3].map(|index| PathBuf::from(index.to_string()));
    let compressor = CommandCompressor::default();
    let err = compressor.compress(input(TransformMethod::Transpile, &paths)).await.unwrap_err();
    assert_eq!(err.to_string(), "No command configured to transpile the bundle extA");

    let output = compressor.compress(input(TransformMethod::None, &paths)).await.unwrap();
    assert_eq!(output.method, TransformMethod::None);
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn run_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ["extA.bundle.js", "extA.bundle.js.map", "extA.min.js", "extA.min.js.map"]
      .map(|file| dir.path().join(file));
    std::fs::write(&paths[0], "minified").unwrap();
    std::fs::write(&paths[1], "{}").unwrap();

    let command = ["sh", "-c", "cp \"$0\" \"$1\" && cp \"$2\" \"$3\""]
      .into_iter()
      .chain(["{input}", "{output}", "{map}", "{outputMap}"])
      .map(ToString::to_string)
      .collect();
    let compressor = CommandCompressor::default().with_command(TransformMethod::Minify, command);
    let output = compressor.compress(input(TransformMethod::Minify, &paths)).await.unwrap();
    assert_eq!(output.code, "minified");
    assert_eq!(output.map, "{}");
    assert_eq!(output.method, TransformMethod::Minify);
  }
}
