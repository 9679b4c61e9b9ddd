#![allow(dead_code)]

use std::{
  path::{Path, PathBuf},
  sync::LazyLock,
};

use amdpack::{AmdConfig, BundleEngine, BundleSpec, BundlerOptions, DirectoryLayout, EngineConfig};
use futures::future::BoxFuture;
use regex::Regex;
use rustc_hash::FxHashSet;

static DEFINE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"define\(\s*(?:'[^']*'\s*,\s*)?\[([^\]]*)\]").unwrap());

pub fn fixtures() -> PathBuf {
  PathBuf::from(env!("WORKSPACE_DIR")).join("fixtures")
}

pub fn layout() -> DirectoryLayout {
  DirectoryLayout::new(fixtures())
}

/// The options shared by the fixture builds, `extA` being the root extension.
pub fn options(extension: &str, bundles: Vec<BundleSpec>) -> BundlerOptions {
  BundlerOptions {
    cwd: Some(fixtures()),
    extension: Some(extension.to_string()),
    root_extension: Some("extA".to_string()),
    amd: Some(AmdConfig {
      base_url: fixtures().join("extA/views/js"),
      default: vec!["controller/**/*".to_string()],
      vendor: vec!["lib/**/*".to_string()],
      bootstrap: vec!["loader/bootstrap".to_string()],
      ..Default::default()
    }),
    bundles: Some(bundles),
    ..Default::default()
  }
}

pub fn bundle(name: &str, configure: impl FnOnce(&mut BundleSpec)) -> BundleSpec {
  let mut bundle = BundleSpec::new(name);
  configure(&mut bundle);
  bundle
}

/// Emulates the optimizer on the fixtures: walks the `define` dependencies of the included
/// modules and logs each bundle, dependencies first.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEngine;

impl BundleEngine for FixtureEngine {
  fn optimize<'a>(&'a self, config: &'a EngineConfig) -> BoxFuture<'a, anyhow::Result<String>> {
    Box::pin(async move {
      let mut log = String::new();
      for module in &config.modules {
        let shallow = module.exclude_shallow.iter().map(|id| id.to_string()).collect();
        let mut deep = FxHashSet::default();
        for id in &module.exclude {
          collect_dependencies(config, id, &mut deep)?;
        }

        let mut walk = Walk { config, shallow, deep, seen: FxHashSet::default(), files: vec![] };
        for id in &module.include {
          walk.visit(id)?;
        }

        log.push_str(&format!("\n{}.js\n----------------\n", module.name));
        for file in walk.files {
          log.push_str(&file);
          log.push('\n');
        }
      }
      Ok(log)
    })
  }
}

/// An engine that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrokenEngine;

impl BundleEngine for BrokenEngine {
  fn optimize<'a>(&'a self, _config: &'a EngineConfig) -> BoxFuture<'a, anyhow::Result<String>> {
    Box::pin(async { Err(anyhow::anyhow!("Error: ENOENT, no such file or directory 'lib/nope.js'")) })
  }
}

struct Walk<'a> {
  config: &'a EngineConfig,
  shallow: FxHashSet<String>,
  deep: FxHashSet<String>,
  seen: FxHashSet<String>,
  files: Vec<String>,
}

impl Walk<'_> {
  fn visit(&mut self, id: &str) -> anyhow::Result<()> {
    // Loader plugins are inlined by the engine, out of the log.
    if id.contains('!') || self.deep.contains(id) || !self.seen.insert(id.to_string()) {
      return Ok(());
    }
    for dependency in dependencies(self.config, id)? {
      self.visit(&dependency)?;
    }
    if !self.shallow.contains(id) {
      self.files.push(format!("{id}.js"));
    }
    Ok(())
  }
}

fn collect_dependencies(
  config: &EngineConfig,
  id: &str,
  collected: &mut FxHashSet<String>,
) -> anyhow::Result<()> {
  if id.contains('!') || !collected.insert(id.to_string()) {
    return Ok(());
  }
  for dependency in dependencies(config, id)? {
    collect_dependencies(config, &dependency, collected)?;
  }
  Ok(())
}

fn dependencies(config: &EngineConfig, id: &str) -> anyhow::Result<Vec<String>> {
  let file = module_file(config, id);
  let source = std::fs::read_to_string(&file)
    .map_err(|err| anyhow::anyhow!("Unable to read {id} from {}: {err}", file.display()))?;
  let Some(captures) = DEFINE_RE.captures(&source) else {
    return Ok(vec![]);
  };
  Ok(
    captures[1]
      .split(',')
      .map(|dependency| dependency.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
      .filter(|dependency| !dependency.is_empty())
      .collect(),
  )
}

/// Maps a module id to its file, through the longest matching `paths` entry.
fn module_file(config: &EngineConfig, id: &str) -> PathBuf {
  let alias = config
    .paths
    .iter()
    .filter(|(alias, _)| id == alias.as_str() || id.starts_with(&format!("{alias}/")))
    .max_by_key(|(alias, _)| alias.len());

  let relative = match alias {
    Some((alias, path)) => {
      let base = Path::new(path);
      let base = if base.is_absolute() { base.to_path_buf() } else { config.base_url.join(base) };
      base.join(id[alias.len()..].trim_start_matches('/'))
    }
    None => config.base_url.join(id),
  };
  let mut file = relative.into_os_string();
  file.push(".js");
  PathBuf::from(file)
}
