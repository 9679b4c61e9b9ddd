use std::path::PathBuf;

use amdpack_error::PackError;
use amdpack_resolver::{ModuleType, ResolveOptions, Resolver};
use amdpack_utils::indexmap::FxIndexMap;

fn fixtures() -> PathBuf {
  PathBuf::from(env!("WORKSPACE_DIR")).join("fixtures")
}

fn extension_path(extension: &str) -> PathBuf {
  fixtures().join(extension).join("views/js")
}

fn aliases(entries: &[(&str, &str)]) -> FxIndexMap<String, String> {
  entries.iter().map(|(alias, target)| ((*alias).to_string(), (*target).to_string())).collect()
}

async fn resolve(pattern: &str, options: &ResolveOptions) -> Vec<String> {
  let resolver = Resolver::default();
  resolver.resolve(pattern, options).await.unwrap().iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn empty_pattern() {
  let options = ResolveOptions::new("extA", extension_path("extA"));
  assert!(resolve("", &options).await.is_empty());
}

#[tokio::test]
async fn pattern_without_wildcard_is_kept() {
  let options = ResolveOptions::new("extA", extension_path("extA"));
  assert_eq!(resolve("loader/bootstrap", &options).await, vec!["loader/bootstrap"]);
  assert_eq!(resolve("extA\\controller\\main", &options).await, vec!["extA/controller/main"]);
}

#[tokio::test]
async fn pattern_without_match() {
  let options = ResolveOptions::new("extA", extension_path("extA"));
  assert!(resolve("nothing/**/*", &options).await.is_empty());

  let options = ResolveOptions::new("extZ", extension_path("extZ"));
  assert!(resolve("**/*", &options).await.is_empty());
}

#[tokio::test]
async fn simple_pattern() {
  let options = ResolveOptions::new("extA", extension_path("extA"));
  assert_eq!(
    resolve("controller/**/*", &options).await,
    vec!["extA/controller/controllera", "extA/controller/controllerb"]
  );
}

#[tokio::test]
async fn pattern_with_extension_segment() {
  let options = ResolveOptions::new("extA", extension_path("extA"));
  assert_eq!(
    resolve("extA/controller/**/*", &options).await,
    vec!["extA/controller/controllera", "extA/controller/controllerb"]
  );
}

#[tokio::test]
async fn complex_pattern_without_prefix() {
  let options = ResolveOptions::new("extA", extension_path("extA")).with_extension_prefix(false);
  assert_eq!(
    resolve("{core,lib}/**/*", &options).await,
    vec![
      "core/corea",
      "core/coreb",
      "core/corec",
      "core/legacy.min",
      "core/util/util",
      "lib/liba",
      "lib/libb",
      "lib/libc"
    ]
  );
}

#[tokio::test]
async fn pattern_with_alias() {
  let options = ResolveOptions::new("extA", extension_path("extA"))
    .with_extension_prefix(false)
    .with_aliases(aliases(&[("foo", "bar"), ("alias", "core")]));
  assert_eq!(
    resolve("alias/**/*", &options).await,
    vec!["alias/corea", "alias/coreb", "alias/corec", "alias/legacy.min", "alias/util/util"]
  );
}

#[tokio::test]
async fn pattern_with_nested_alias() {
  let options = ResolveOptions::new("extA", extension_path("extA"))
    .with_extension_prefix(false)
    .with_aliases(aliases(&[("foo/alias", "core"), ("ootch", "lib")]));
  assert_eq!(
    resolve("foo/alias/**/*", &options).await,
    vec![
      "foo/alias/corea",
      "foo/alias/coreb",
      "foo/alias/corec",
      "foo/alias/legacy.min",
      "foo/alias/util/util"
    ]
  );
}

#[tokio::test]
async fn alias_sharing_a_textual_prefix() {
  let options = ResolveOptions::new("extA", extension_path("extA"))
    .with_extension_prefix(false)
    .with_aliases(aliases(&[("foo/alias", "lib"), ("foo/aliasButton", "core")]));
  assert_eq!(
    resolve("foo/aliasButton/**/*", &options).await,
    vec![
      "foo/aliasButton/corea",
      "foo/aliasButton/coreb",
      "foo/aliasButton/corec",
      "foo/aliasButton/legacy.min",
      "foo/aliasButton/util/util"
    ]
  );
}

#[tokio::test]
async fn alias_resolving_elsewhere() {
  let options = ResolveOptions::new("extA", extension_path("extA"))
    .with_extension_prefix(false)
    .with_aliases(aliases(&[("core", "../../../extC/views/js")]));
  assert_eq!(
    resolve("core/**/*", &options).await,
    vec!["core/component/compa", "core/controller/controllera"]
  );
}

#[tokio::test]
async fn excluded_directories() {
  let options =
    ResolveOptions::new("extB", extension_path("extB")).with_exclude_dirs(vec!["test".to_string()]);
  assert_eq!(
    resolve("**/*", &options).await,
    vec!["extB/component/compa", "extB/controller/controllera", "extB/lib/vendored"]
  );

  let options = ResolveOptions::new("extB", extension_path("extB")).with_exclude_dirs(vec![]);
  assert!(resolve("**/*", &options).await.contains(&"extB/test/component/compa".to_string()));
}

#[tokio::test]
async fn existing_namespaces_are_not_prefixed_again() {
  let options = ResolveOptions::new("extB", fixtures()).with_dependencies(vec!["extC".to_string()]);
  assert_eq!(
    resolve("{extB,extC}/views/js/component/*", &options).await,
    vec!["extB/views/js/component/compa", "extC/views/js/component/compa"]
  );

  let options = ResolveOptions::new("extB", fixtures());
  assert_eq!(
    resolve("{extB,extC}/views/js/component/*", &options).await,
    vec!["extB/views/js/component/compa", "extB/extC/views/js/component/compa"]
  );
}

#[tokio::test]
async fn css_modules() {
  let options = ResolveOptions::new("extC", extension_path("extC")).with_type(ModuleType::Css);
  assert_eq!(resolve("**/*", &options).await, vec!["css!extC/component/compa"]);
}

#[tokio::test]
async fn tpl_modules() {
  let options = ResolveOptions::new("extC", extension_path("extC")).with_type(ModuleType::Tpl);
  assert_eq!(resolve("**/*", &options).await, vec!["tpl!extC/component/compa"]);
}

#[tokio::test]
async fn json_modules_keep_their_suffix() {
  let options = ResolveOptions::new("extA", extension_path("extA")).with_type(ModuleType::Json);
  assert_eq!(resolve("**/*", &options).await, vec!["json!extA/i18n/en.json"]);

  let options = options.with_extension_prefix(false);
  assert_eq!(resolve("**/*", &options).await, vec!["json!i18n/en.json"]);
}

#[tokio::test]
async fn unsupported_type_fails_before_any_io() {
  let err = "php".parse::<ModuleType>().unwrap_err();
  assert!(err.to_string().starts_with("Unsupported module type 'php'"));
}

#[tokio::test]
async fn walks_are_reused() {
  let resolver = Resolver::default();
  let options = ResolveOptions::new("extA", extension_path("extA"));
  let first = resolver.resolve("**/*", &options).await.unwrap();
  let css = resolver.resolve("**/*", &options.clone().with_type(ModuleType::Css)).await.unwrap();
  let second = resolver.resolve("**/*", &options).await.unwrap();
  assert_eq!(first, second);
  assert!(css.is_empty());
  assert!(first.iter().all(|id| !id.contains("/loader/") && !id.contains("/test/")));
}

#[cfg(unix)]
#[tokio::test]
async fn failing_walk_names_the_pattern() {
  let dir = tempfile::tempdir().unwrap();
  let js = dir.path().join("extA/views/js");
  std::fs::create_dir_all(js.join("core")).unwrap();
  std::fs::write(js.join("core/corea.js"), "").unwrap();
  std::os::unix::fs::symlink(&js, js.join("core/loop")).unwrap();

  let options = ResolveOptions::new("extA", js.clone());
  let err = Resolver::default().resolve("**/*", &options).await.unwrap_err();
  match err.find::<PackError>() {
    Some(PackError::Resolution { pattern, cwd, .. }) => {
      assert_eq!(pattern, "**/*");
      assert_eq!(cwd, &js);
    }
    other => panic!("unexpected error {other:?}"),
  }
}
