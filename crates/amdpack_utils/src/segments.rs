//! Helpers working on slash separated module paths, one segment at a time.
//!
//! Matching is always bounded by `/`, so `ext` never matches `extension2`.

#[inline]
pub fn normalize_separators(value: &str) -> String {
  value.replace('\\', "/")
}

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
  path.split('/').filter(|segment| !segment.is_empty())
}

pub fn has_segment(path: &str, name: &str) -> bool {
  !name.is_empty() && segments(path).any(|segment| segment == name)
}

/// Returns the remainder of `path` after `prefix` when `prefix` covers whole segments.
///
/// The remainder keeps its leading `/`, or is empty on an exact match.
pub fn strip_segment_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
  let prefix = prefix.trim_end_matches('/');
  if prefix.is_empty() {
    return None;
  }
  let rest = path.strip_prefix(prefix)?;
  (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

pub fn starts_with_segments(path: &str, prefix: &str) -> bool {
  strip_segment_prefix(path, prefix).is_some()
}

/// Swaps the leading `from` segments of `path` for `to`.
pub fn replace_segment_prefix(path: &str, from: &str, to: &str) -> Option<String> {
  let rest = strip_segment_prefix(path, from)?;
  let to = to.trim_end_matches('/');
  if to.is_empty() {
    return Some(rest.trim_start_matches('/').to_string());
  }
  Some(format!("{to}{rest}"))
}

/// Splits `css!foo/bar` into `("css!", "foo/bar")`. Ids without loader give an empty prefix.
pub fn split_loader_prefix(id: &str) -> (&str, &str) {
  match id.find('!') {
    Some(index) if !id[..index].contains('/') => id.split_at(index + 1),
    _ => ("", id),
  }
}
