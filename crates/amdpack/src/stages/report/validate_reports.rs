use std::iter;

use rustc_hash::FxHashSet;

use amdpack_common::{BundleReport, ModuleType, NormalizedBundlerOptions};
use amdpack_error::{BuildResult, PackError};
use amdpack_utils::segments::{has_segment, segments, split_loader_prefix, starts_with_segments};

/// Checks an extension ships its own modules only.
///
/// Allowed are the modules of its namespace, the explicitly allowed ones, the bootstrap modules
/// and the declared packages. Standalone bundles and the root extension are not checked.
pub fn validate_reports(
  options: &NormalizedBundlerOptions,
  reports: &[BundleReport],
) -> BuildResult<()> {
  if options.is_root_extension() {
    return Ok(());
  }

  let standalone = options
    .bundles
    .iter()
    .filter(|bundle| bundle.standalone)
    .map(|bundle| format!("{}.js", options.bundle_destination(bundle)))
    .collect::<FxHashSet<_>>();

  let policy = AllowPolicy::new(options);
  for report in reports.iter().filter(|report| !standalone.contains(&report.title)) {
    let forbidden = report
      .content
      .iter()
      .map(|file| strip_file_suffix(file))
      .find(|module| !policy.allows(module));

    if let Some(module) = forbidden {
      return Err(
        PackError::PolicyViolation { bundle: report.title.clone(), module: module.to_string() }
          .into(),
      );
    }
  }

  Ok(())
}

/// `extB/a.js` and `tpl!extB/a.tpl` lose their suffix, `json!` ids keep it.
fn strip_file_suffix(file: &str) -> &str {
  let (loader, _) = split_loader_prefix(file);
  if loader == ModuleType::Json.amd_loader() {
    return file;
  }

  let name_start = file.rfind('/').map_or(0, |index| index + 1);
  match file[name_start..].rsplit_once('.') {
    Some((stem, suffix))
      if !stem.is_empty() && ModuleType::ALL.iter().any(|ty| ty.file_extension() == suffix) =>
    {
      &file[..name_start + stem.len()]
    }
    _ => file,
  }
}

struct AllowPolicy<'a> {
  extension: &'a str,
  css_namespace: String,
  allowed: FxHashSet<&'a str>,
  package_roots: Vec<&'a str>,
}

impl<'a> AllowPolicy<'a> {
  fn new(options: &'a NormalizedBundlerOptions) -> Self {
    let allowed = options
      .allow_external
      .iter()
      .chain(options.amd.bootstrap.iter())
      .map(String::as_str)
      .collect();
    let package_roots = options
      .amd
      .packages
      .iter()
      .flat_map(|package| iter::once(package.name.as_str()).chain(package.location.as_deref()))
      .filter(|root| !root.is_empty())
      .collect();

    Self {
      extension: &options.extension.name,
      css_namespace: options.extension.css_namespace(),
      allowed,
      package_roots,
    }
  }

  fn allows(&self, module: &str) -> bool {
    self.in_namespace(module)
      || self.allowed.contains(module)
      || self.package_roots.iter().any(|root| starts_with_segments(module, root))
  }

  /// `extB/a`, `css!extBCss/a` or `lib/extB/a` belong to `extB`.
  fn in_namespace(&self, module: &str) -> bool {
    let (_, body) = split_loader_prefix(module);
    let first = segments(body).next();
    first.is_some_and(|first| first == self.extension || first == self.css_namespace)
      || has_segment(body, self.extension)
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use amdpack_common::{AmdConfig, BundleSpec, ExtensionDescriptor, PackageConfig};

  use super::*;

  fn extension(name: &str, is_root: bool) -> ExtensionDescriptor {
    ExtensionDescriptor {
      name: name.to_string(),
      path: PathBuf::from(name),
      css_path: PathBuf::from(name),
      is_root,
    }
  }

  fn options() -> NormalizedBundlerOptions {
    let mut standalone = BundleSpec::new("standalone");
    standalone.standalone = true;
    NormalizedBundlerOptions {
      extension: extension("extB", false),
      root_extension: extension("extA", true),
      dependencies: vec![],
      amd: AmdConfig {
        bootstrap: vec!["loader/bootstrap".to_string()],
        packages: vec![PackageConfig {
          name: "codemirror".to_string(),
          location: Some("lib/codemirror".to_string()),
          main: None,
        }],
        ..Default::default()
      },
      paths: Default::default(),
      allow_external: vec!["ui/feedback".to_string()],
      work_dir: PathBuf::from("output"),
      output_dir: "loader".to_string(),
      bundles: vec![BundleSpec::new("extB"), standalone],
    }
  }

  fn report(title: &str, content: &[&str]) -> BundleReport {
    BundleReport {
      title: title.to_string(),
      content: content.iter().map(ToString::to_string).collect(),
    }
  }

  #[test]
  fn allowed_modules() {
    let reports = [report(
      "extB/loader/extB.bundle.js",
      &[
        "extB/component/compa.js",
        "css!extBCss/main",
        "tpl!extB/component/compa",
        "lib/extB/patch.js",
        "loader/bootstrap.js",
        "ui/feedback.js",
        "codemirror/mode.js",
        "lib/codemirror/lib/codemirror.js",
      ],
    )];
    assert!(validate_reports(&options(), &reports).is_ok());
  }

  #[test]
  fn forbidden_module() {
    let reports =
      [report("extB/loader/extB.bundle.js", &["extB/component/compa.js", "extBee/a.js"])];
    let err = validate_reports(&options(), &reports).unwrap_err();
    match err.find::<PackError>() {
      Some(PackError::PolicyViolation { bundle, module }) => {
        assert_eq!(bundle, "extB/loader/extB.bundle.js");
        assert_eq!(module, "extBee/a");
      }
      other => panic!("unexpected error {other:?}"),
    }
  }

  #[test]
  fn file_suffixes_are_stripped() {
    assert_eq!(strip_file_suffix("extB/a.js"), "extB/a");
    assert_eq!(strip_file_suffix("tpl!ui/feedback.tpl"), "tpl!ui/feedback");
    assert_eq!(strip_file_suffix("css!ui/feedback.css"), "css!ui/feedback");
    assert_eq!(strip_file_suffix("json!extB/i18n/en.json"), "json!extB/i18n/en.json");
    assert_eq!(strip_file_suffix("lib/jquery.min"), "lib/jquery.min");
    assert_eq!(strip_file_suffix("lib.d/.js"), "lib.d/.js");
  }

  #[test]
  fn allowed_modules_of_any_type() {
    let mut options = options();
    options.allow_external.push("tpl!ui/feedback".to_string());
    options.amd.bootstrap.push("css!loader/bootstrap".to_string());
    let reports = [report(
      "extB/loader/extB.bundle.js",
      &["tpl!ui/feedback.tpl", "css!loader/bootstrap.css", "extB/component/compa.js"],
    )];
    assert!(validate_reports(&options, &reports).is_ok());

    let reports = [report("extB/loader/extB.bundle.js", &["tpl!ui/other.tpl"])];
    let err = validate_reports(&options, &reports).unwrap_err();
    match err.find::<PackError>() {
      Some(PackError::PolicyViolation { module, .. }) => assert_eq!(module, "tpl!ui/other"),
      other => panic!("unexpected error {other:?}"),
    }
  }

  #[test]
  fn exempted_bundles() {
    let reports = [report("extB/loader/standalone.bundle.js", &["core/util/util.js"])];
    assert!(validate_reports(&options(), &reports).is_ok());

    let mut options = options();
    options.extension = extension("extA", true);
    let reports = [report("loader/extA.bundle.js", &["core/util/util.js"])];
    assert!(validate_reports(&options, &reports).is_ok());
  }
}
