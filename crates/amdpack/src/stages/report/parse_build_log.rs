use amdpack_common::BundleReport;

/// Reads the bundles out of the engine log.
///
/// The log is made of blocks separated by blank lines. A bundle block starts with the bundle
/// file, followed by a dashed line and the files it contains:
///
/// ```text
/// extB/loader/extB.bundle.js
/// ----------------
/// extB/component/compa.js
/// extB/controller/controllera.js
/// ```
///
/// Any other block, ie. tracing output, is ignored.
pub fn parse_build_log(log: &str) -> Vec<BundleReport> {
  let mut reports = vec![];
  let mut block = vec![];

  for line in log.lines().map(str::trim).chain(std::iter::once("")) {
    if line.is_empty() {
      if let Some(report) = block_to_report(&block) {
        reports.push(report);
      }
      block.clear();
    } else {
      block.push(line);
    }
  }

  reports
}

fn block_to_report(block: &[&str]) -> Option<BundleReport> {
  match block {
    [title, separator, content @ ..] if is_separator(separator) => Some(BundleReport {
      title: (*title).to_string(),
      content: content.iter().map(ToString::to_string).collect(),
    }),
    _ => None,
  }
}

fn is_separator(line: &str) -> bool {
  line.len() >= 3 && line.bytes().all(|byte| byte == b'-')
}
