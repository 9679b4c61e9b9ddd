const GLOB_CHARS: [char; 4] = ['*', '?', '[', '{'];

/// Only patterns with a star are expanded, anything else is already a module id.
#[inline]
pub fn has_wildcard(pattern: &str) -> bool {
  pattern.contains('*')
}

/// Splits a pattern into its literal leading directories and the glob part.
///
/// `../lib/**/*.js` becomes `("../lib", "**/*.js")`.
pub fn split_glob_base(pattern: &str) -> (&str, &str) {
  let mut base_end = 0;
  let mut offset = 0;
  for segment in pattern.split('/') {
    if segment.contains(&GLOB_CHARS[..]) {
      break;
    }
    offset += segment.len() + 1;
    if offset <= pattern.len() {
      base_end = offset;
    }
  }
  if base_end == 0 {
    return ("", pattern);
  }
  (pattern[..base_end].trim_end_matches('/'), &pattern[base_end..])
}

#[test]
fn test_split_glob_base() {
  assert_eq!(split_glob_base("controller/**/*"), ("controller", "**/*"));
  assert_eq!(split_glob_base("{core,lib}/**/*"), ("", "{core,lib}/**/*"));
  assert_eq!(split_glob_base("**/*"), ("", "**/*"));
  assert_eq!(split_glob_base("../../extC/views/js/**/*"), ("../../extC/views/js", "**/*"));
  assert_eq!(split_glob_base("/abs/dir/*.js"), ("/abs/dir", "*.js"));
  assert!(has_wildcard("a/*"));
  assert!(!has_wildcard("loader/bootstrap"));
}
