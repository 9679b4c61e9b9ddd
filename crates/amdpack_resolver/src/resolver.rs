use std::{io, path::PathBuf, sync::Arc};

use dashmap::DashMap;

use amdpack_common::{ModuleId, ResolveOptions};
use amdpack_error::{BuildResult, PackError};
use amdpack_fs::{FileSystem, OsFileSystem};
use amdpack_utils::{
  path_ext::PathExt,
  segments::{
    has_segment, normalize_separators, replace_segment_prefix, segments, strip_segment_prefix,
  },
};

use crate::{
  alias::find_alias,
  glob_pattern::{has_wildcard, split_glob_base},
};

/// Resolves AMD module patterns against a file system.
///
/// Directory walks are cached for the lifetime of the resolver, so a resolver should
/// not outlive the build it serves.
#[derive(Debug)]
pub struct Resolver<F: FileSystem + Clone + 'static = OsFileSystem> {
  fs: F,
  walked: DashMap<PathBuf, Arc<Vec<String>>>,
}

impl<F: FileSystem + Clone + 'static> Resolver<F> {
  pub fn new(fs: F) -> Self {
    Self { fs, walked: DashMap::default() }
  }

  pub fn fs(&self) -> &F {
    &self.fs
  }

  /// Expands `pattern` into the list of module ids it matches.
  ///
  /// Patterns without `*` are returned as is. Expansion errors only on a failing walk,
  /// a pattern that matches nothing gives an empty list.
  pub async fn resolve(
    &self,
    pattern: &str,
    options: &ResolveOptions,
  ) -> BuildResult<Vec<ModuleId>> {
    if pattern.is_empty() {
      return Ok(vec![]);
    }

    let pattern = normalize_separators(pattern);
    if !has_wildcard(&pattern) {
      return Ok(vec![ModuleId::from(pattern)]);
    }

    let module_type = options.module_type;
    let suffix = format!(".{}", module_type.file_extension());

    // The alias is only used to walk the real directory, ids keep the alias spelling.
    let alias = find_alias(&pattern, &options.aliases);
    let aliased_pattern = alias
      .and_then(|(alias, target)| replace_segment_prefix(&pattern, alias, target))
      .unwrap_or_else(|| pattern.clone());

    // We walk from the extension root: taoQtiTest/runner/**/* becomes runner/**/*
    let file_pattern = strip_segment_prefix(&aliased_pattern, &options.target_extension)
      .map_or(aliased_pattern.as_str(), |rest| rest.trim_start_matches('/'));

    let (base, glob) = split_glob_base(file_pattern);
    let root = if base.is_empty() { options.cwd.clone() } else { options.cwd.join(base) };

    let files = self.walk(root).await.map_err(|source| PackError::Resolution {
      pattern: pattern.clone(),
      cwd: options.cwd.clone(),
      source,
    })?;

    let mut matches = files
      .iter()
      .filter(|relative| !is_hidden(relative) && matches_glob(glob, relative))
      .map(|relative| if base.is_empty() { relative.clone() } else { format!("{base}/{relative}") })
      .filter(|file| file.ends_with(&suffix) && !is_in_excluded_dir(file, &options.exclude_dirs))
      .collect::<Vec<_>>();
    matches.sort_unstable();

    let modules = matches
      .into_iter()
      .map(|file| {
        // runner/provider/qti.js becomes taoQtiTest/runner/provider/qti
        let namespace = if needs_namespace(&file, options) {
          format!("{}/", options.target_extension)
        } else {
          String::new()
        };
        let body = if module_type.keeps_file_extension() {
          file.as_str()
        } else {
          &file[..file.len() - suffix.len()]
        };

        let mut id = format!("{namespace}{body}");
        if let Some((alias, target)) = alias {
          id = replace_segment_prefix(&id, target, alias)
            .or_else(|| {
              replace_segment_prefix(body, target, alias).map(|body| format!("{namespace}{body}"))
            })
            .unwrap_or(id);
        }

        ModuleId::from(normalize_separators(&format!("{}{id}", module_type.amd_loader())))
      })
      .collect::<Vec<_>>();

    tracing::trace!(pattern = %pattern, cwd = %options.cwd.display(), count = modules.len(), "resolved");

    Ok(modules)
  }

  async fn walk(&self, root: PathBuf) -> io::Result<Arc<Vec<String>>> {
    if let Some(files) = self.walked.get(&root) {
      return Ok(Arc::clone(files.value()));
    }

    let fs = self.fs.clone();
    let walk_root = root.clone();
    let files = tokio::task::spawn_blocking(move || fs.walk_files(&walk_root))
      .await
      .map_err(io::Error::other)??;

    let files = Arc::new(files.iter().map(|file| file.to_slash_string()).collect::<Vec<_>>());
    self.walked.insert(root, Arc::clone(&files));
    Ok(files)
  }
}

impl Default for Resolver<OsFileSystem> {
  fn default() -> Self {
    Self::new(OsFileSystem)
  }
}

fn matches_glob(glob: &str, path: &str) -> bool {
  // `**/` also stands for no directory at all
  fast_glob::glob_match(glob, path)
    || glob.strip_prefix("**/").is_some_and(|rest| fast_glob::glob_match(rest, path))
}

fn is_hidden(relative: &str) -> bool {
  segments(relative).any(|segment| segment.starts_with('.'))
}

fn is_in_excluded_dir(file: &str, exclude_dirs: &[String]) -> bool {
  let Some((dirs, _file_name)) = file.rsplit_once('/') else {
    return false;
  };
  segments(dirs).any(|dir| exclude_dirs.iter().any(|excluded| excluded == dir))
}

fn needs_namespace(file: &str, options: &ResolveOptions) -> bool {
  options.extension_prefix
    && !options.target_extension.is_empty()
    && !has_segment(file, &options.target_extension)
    && !options.dependencies.iter().any(|dependency| has_segment(file, dependency))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn excluded_dirs_at_any_depth() {
    let exclude = vec!["loader".to_string(), "test".to_string()];
    assert!(is_in_excluded_dir("loader/bootstrap.js", &exclude));
    assert!(is_in_excluded_dir("a/test/b.js", &exclude));
    assert!(!is_in_excluded_dir("a/tests/b.js", &exclude));
    assert!(!is_in_excluded_dir("test.js", &exclude));
  }

  #[test]
  fn glob_star_star_matches_top_level() {
    assert!(matches_glob("**/*", "a.js"));
    assert!(matches_glob("**/*", "a/b/c.js"));
    assert!(matches_glob("{core,lib}/**/*", "lib/liba.js"));
    assert!(!matches_glob("{core,lib}/**/*", "controller/a.js"));
  }

  #[test]
  fn hidden_files() {
    assert!(is_hidden(".eslintrc.js"));
    assert!(is_hidden("a/.cache/b.js"));
    assert!(!is_hidden("a/b.js"));
  }
}
