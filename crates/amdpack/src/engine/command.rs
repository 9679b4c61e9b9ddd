use std::path::PathBuf;

use anyhow::Context;
use futures::future::BoxFuture;

use amdpack_common::EngineConfig;
use amdpack_utils::path_ext::PathExt;

use super::BundleEngine;

const CONFIG_PLACEHOLDER: &str = "{config}";

/// Runs an external optimizer, ie. `node r.js -o {config}`.
///
/// The build configuration is written to `config_file` and `{config}` in the arguments is
/// replaced by its path. The standard output of the process is the build log.
#[derive(Debug, Clone)]
pub struct CommandEngine {
  program: String,
  args: Vec<String>,
  config_file: PathBuf,
}

impl CommandEngine {
  pub fn new(program: impl Into<String>, args: Vec<String>, config_file: impl Into<PathBuf>) -> Self {
    Self { program: program.into(), args, config_file: config_file.into() }
  }

  /// Builds the engine from a whitespace separated command line.
  pub fn parse(command: &str, config_file: impl Into<PathBuf>) -> anyhow::Result<Self> {
    let mut parts = command.split_whitespace().map(ToString::to_string);
    let program = parts.next().context("The engine command is empty")?;
    Ok(Self::new(program, parts.collect(), config_file))
  }
}

impl BundleEngine for CommandEngine {
  fn optimize<'a>(&'a self, config: &'a EngineConfig) -> BoxFuture<'a, anyhow::Result<String>> {
    Box::pin(async move {
      let build_file = serde_json::to_string_pretty(config)?;
      if let Some(parent) = self.config_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
      }
      tokio::fs::write(&self.config_file, build_file)
        .await
        .with_context(|| format!("Unable to write {}", self.config_file.display()))?;

      let config_path = self.config_file.to_slash_string();
      let args = self.args.iter().map(|arg| arg.replace(CONFIG_PLACEHOLDER, &config_path));

      tracing::debug!(program = %self.program, config = %config_path, "Starting the bundling engine");
      let output = tokio::process::Command::new(&self.program)
        .args(args)
        .output()
        .await
        .with_context(|| format!("Unable to start {}", self.program))?;

      if !output.status.success() {
        anyhow::bail!(
          "{} exited with {}: {}",
          self.program,
          output.status,
          String::from_utf8_lossy(&output.stderr).trim()
        );
      }

      Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    })
  }
}
