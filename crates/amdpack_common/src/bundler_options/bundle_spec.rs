use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[allow(clippy::struct_excessive_bools)] // Using raw booleans is more clear in this case
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleSpec {
  /// The name with no extension, ie `vendor`.
  pub name: String,
  pub vendor: bool,
  pub bootstrap: bool,
  pub standalone: bool,
  pub default: bool,
  pub entry_point: Option<String>,
  pub include: Vec<String>,
  /// Shallow excludes, the dependencies of an excluded module stay.
  pub exclude: Vec<String>,
  /// Deep excludes, handed to the engine untouched.
  pub exclude_nested: Vec<String>,
  /// Overrides the bundles to load before this one. Use full module ids.
  pub dependencies: Option<Vec<String>>,
  pub babel: bool,
  pub uglify: Option<bool>,
}

impl BundleSpec {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Default::default() }
  }

  pub fn transform_method(&self) -> TransformMethod {
    if self.babel {
      TransformMethod::Transpile
    } else if self.uglify == Some(false) {
      TransformMethod::None
    } else {
      TransformMethod::Minify
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMethod {
  None,
  Minify,
  Transpile,
}

impl Display for TransformMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::None => write!(f, "none"),
      Self::Minify => write!(f, "minify"),
      Self::Transpile => write!(f, "transpile"),
    }
  }
}

#[test]
fn test_transform_method() {
  let mut bundle = BundleSpec::new("extA");
  assert_eq!(bundle.transform_method(), TransformMethod::Minify);
  bundle.uglify = Some(false);
  assert_eq!(bundle.transform_method(), TransformMethod::None);
  bundle.babel = true;
  assert_eq!(bundle.transform_method(), TransformMethod::Transpile);
}
