mod pack_error;

use std::ops::{Deref, DerefMut};

pub use crate::pack_error::PackError;

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Finds the first error of the given typed kind, if any.
  pub fn find<E>(&self) -> Option<&E>
  where
    E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
  {
    self.0.iter().find_map(|error| error.downcast_ref::<E>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (index, error) in self.0.iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }
      write!(f, "{error:#}")?;
    }
    Ok(())
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<PackError> for BuildError {
  fn from(error: PackError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_find_typed_error() {
  let error = BuildError::from(vec![
    anyhow::anyhow!("plain failure"),
    PackError::Engine("r.js exited with 1".to_string()).into(),
  ]);
  assert!(matches!(error.find::<PackError>(), Some(PackError::Engine(_))));
  assert_eq!(error.to_string(), "plain failure\nThe bundling engine failed: r.js exited with 1");
}

#[test]
fn test_resolution_cause_is_printed_once() {
  let error = BuildError::from(PackError::Resolution {
    pattern: "**/*".to_string(),
    cwd: std::path::PathBuf::from("extA/views/js"),
    source: std::io::Error::other("File system loop found"),
  });
  assert_eq!(
    error.to_string(),
    "Unable to resolve the modules matching '**/*' from extA/views/js: File system loop found"
  );
}
