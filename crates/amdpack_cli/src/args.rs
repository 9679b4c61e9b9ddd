use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub struct InputArgs {
  /// The bundle configuration, a JSON file.
  #[clap(long, short)]
  pub config: PathBuf,

  /// The project root, holding one directory per extension.
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, short)]
  pub extension: Option<String>,

  #[clap(long)]
  pub root_extension: Option<String>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub dependency: Option<Vec<String>>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long)]
  pub work_dir: Option<PathBuf>,

  #[clap(long, short = 'o')]
  pub output_dir: Option<String>,

  /// Stop once the bundles are built, nothing is published.
  #[clap(long)]
  pub skip_transform: bool,
}

#[derive(Args)]
pub struct EngineArgs {
  /// The optimizer command, `{config}` is replaced by the build file path.
  #[clap(long, default_value = "r.js -o {config}")]
  pub engine: String,

  #[clap(long, default_value = "amdpack.build.json")]
  pub build_file: PathBuf,

  /// Command minifying a bundle, ie. `uglifyjs {input} --source-map content={map} -o {output}`.
  #[clap(long)]
  pub minify: Option<String>,

  /// Command transpiling a bundle, same placeholders as `--minify`.
  #[clap(long)]
  pub transpile: Option<String>,
}

#[derive(Args)]
pub struct LogArgs {
  /// -v for debug logs, -vv for trace logs.
  #[clap(long, short, action = clap::ArgAction::Count)]
  pub verbose: u8,

  #[clap(long, short)]
  pub silent: bool,
}
