use serde::Serialize;

/// What the engine actually put into one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReport {
  /// The destination file, ie. `taoQtiTest/loader/taoQtiTest.bundle.js`.
  pub title: String,
  /// Source files in dependency order.
  pub content: Vec<String>,
}
