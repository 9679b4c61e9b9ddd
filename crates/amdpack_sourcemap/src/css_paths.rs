use std::sync::LazyLock;

use memchr::memmem;
use regex::Regex;

use amdpack_utils::indexmap::FxIndexMap;

static CSS_SOURCE_MAP_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"sourceMappingURL=([\w|\-|.]+).css.map").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCssMaps {
  pub map: String,
  pub code: String,
}

/// Gives the `sourceMappingURL` of inlined stylesheets the directory they were loaded from.
///
/// The directory comes from the matching `css!<dir>/<file>` import, after replacing the first
/// alias of `paths` it contains. Stylesheets without such an import fall back to
/// `css_source_map_path`. Returns `None` when no css source map path is configured.
pub fn resolve_css_paths(
  map_body: &str,
  code_body: &str,
  paths: &FxIndexMap<String, String>,
  css_source_map_path: &str,
) -> Option<ResolvedCssMaps> {
  if css_source_map_path.is_empty() {
    return None;
  }

  let mut resolved = ResolvedCssMaps { map: map_body.to_string(), code: code_body.to_string() };
  if memmem::find(code_body.as_bytes(), b"sourceMappingURL=").is_none() {
    return Some(resolved);
  }

  for captures in CSS_SOURCE_MAP_RE.captures_iter(code_body) {
    let file = &captures[1];
    let dir = css_import_dir(code_body, file).map_or_else(
      || css_source_map_path.to_string(),
      |dir| {
        paths
          .iter()
          .find(|(alias, _)| dir.contains(alias.as_str()))
          .map_or_else(|| dir.to_string(), |(alias, target)| dir.replacen(alias.as_str(), target, 1))
      },
    );

    let bare = format!("sourceMappingURL={file}.css.map");
    let with_dir = format!("sourceMappingURL={dir}/{file}.css.map");
    resolved.map = resolved.map.replacen(&bare, &with_dir, 1);
    resolved.code = resolved.code.replacen(&bare, &with_dir, 1);
  }

  Some(resolved)
}

fn css_import_dir<'a>(code: &'a str, file: &str) -> Option<&'a str> {
  let import = Regex::new(&format!(r#"css!([\w|\-|.|/]+)/{}([\.css|'"])"#, regex::escape(file)))
    .ok()?;
  import.captures(code).and_then(|captures| captures.get(1)).map(|dir| dir.as_str())
}
