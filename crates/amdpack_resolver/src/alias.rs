use amdpack_utils::{indexmap::FxIndexMap, segments::starts_with_segments};

/// Picks the alias applying to `pattern`: the longest key matching whole leading segments.
///
/// Keys of the same length keep their declaration order, the first one wins.
pub fn find_alias<'a>(
  pattern: &str,
  aliases: &'a FxIndexMap<String, String>,
) -> Option<(&'a str, &'a str)> {
  let mut found: Option<(&'a str, &'a str)> = None;
  for (alias, target) in aliases {
    if !starts_with_segments(pattern, alias) {
      continue;
    }
    let alias = alias.trim_end_matches('/');
    if found.map_or(true, |(current, _)| alias.len() > current.len()) {
      found = Some((alias, target.as_str()));
    }
  }
  found
}
