mod args;
mod logging;

use std::{path::Path, process::ExitCode, time::Instant};

use ansi_term::Colour;
use anyhow::Context;
use args::{EngineArgs, InputArgs, LogArgs, OutputArgs};
use clap::Parser;

use amdpack::{
  BuildResult, BundleReport, Bundler, BundlerOptions, CommandCompressor, CommandEngine,
  DirectoryLayout, PassThroughCompressor, TransformMethod, TransformedBundle,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  engine: EngineArgs,

  #[clap(flatten)]
  log: LogArgs,
}

fn load_options(config: &Path) -> anyhow::Result<BundlerOptions> {
  let content = std::fs::read_to_string(config)
    .with_context(|| format!("Unable to read {}", config.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Invalid configuration {}", config.display()))
}

fn print_reports(reports: &[BundleReport]) {
  let left = reports.iter().map(|report| report.title.len()).max().unwrap_or_default();

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for report in reports {
    println!(
      "{}{:left$} {}{}",
      color.paint(&report.title),
      "",
      dim.paint("bundle │ modules: "),
      report.content.len(),
      left = left - report.title.len()
    );
  }
}

fn print_transformed(bundles: &[TransformedBundle], cwd: &Path) {
  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for bundle in bundles {
    let dest = bundle.dest.strip_prefix(cwd).unwrap_or(&bundle.dest);
    println!(
      "{}{} {}{}",
      dim.paint("<DIR>/"),
      color.paint(dest.display().to_string()),
      dim.paint("│ "),
      dim.paint(bundle.method.to_string())
    );
  }
}

async fn run(args: Commands) -> BuildResult<()> {
  let mut options = load_options(&args.input.config)?;

  let cwd = match args.input.cwd.or(options.cwd.take()) {
    Some(cwd) => cwd,
    None => std::env::current_dir().map_err(anyhow::Error::from)?,
  };
  options.cwd = Some(cwd.clone());
  options.extension = args.input.extension.or(options.extension);
  options.root_extension = args.input.root_extension.or(options.root_extension);
  options.dependencies = args.input.dependency.or(options.dependencies);
  options.work_dir = args.output.work_dir.or(options.work_dir);
  options.output_dir = args.output.output_dir.or(options.output_dir);

  let engine = CommandEngine::parse(&args.engine.engine, cwd.join(&args.engine.build_file))?;
  let bundler = Bundler::new(options, DirectoryLayout::new(&cwd), engine)?;

  let start = Instant::now();
  let reports = bundler.plan().await?;
  if !args.log.silent {
    print_reports(&reports);
  }

  if !args.output.skip_transform {
    let transformed = if args.engine.minify.is_none() && args.engine.transpile.is_none() {
      bundler.transform(&PassThroughCompressor).await?
    } else {
      let mut compressor = CommandCompressor::default();
      for (method, command) in [
        (TransformMethod::Minify, &args.engine.minify),
        (TransformMethod::Transpile, &args.engine.transpile),
      ] {
        if let Some(command) = command {
          compressor = compressor.with_command_line(method, command);
        }
      }
      bundler.transform(&compressor).await?
    };

    if !args.log.silent {
      print_transformed(&transformed, &cwd);
    }
  }

  let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
  println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
  Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
  let args = Commands::parse();
  logging::init(args.log.verbose, args.log.silent);

  match run(args).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(errors) => {
      for error in &*errors {
        println!("{} {:#}", Colour::Red.paint("Error:"), error);
      }
      ExitCode::FAILURE
    }
  }
}
