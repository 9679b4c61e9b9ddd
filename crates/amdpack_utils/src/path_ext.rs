use std::path::Path;

use sugar_path::SugarPath;

pub trait PathExt {
  /// Forward-slash rendering of the path, whatever the host separator is.
  fn to_slash_string(&self) -> String;

  fn file_name_str(&self) -> Option<&str>;
}

impl PathExt for Path {
  fn to_slash_string(&self) -> String {
    self.to_slash_lossy().into_owned()
  }

  fn file_name_str(&self) -> Option<&str> {
    self.file_name().and_then(|name| name.to_str())
  }
}

#[test]
fn test_to_slash_string() {
  let path = Path::new("controller").join("sub").join("a.js");
  assert_eq!(path.to_slash_string(), "controller/sub/a.js");
  assert_eq!(path.file_name_str(), Some("a.js"));
}
