use std::{
  io,
  path::{Path, PathBuf},
};

/// The read/write surface the resolver and the planner need from a disk.
pub trait FileSystem: Send + Sync {
  fn exists(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  /// Lists every file below `root`, as paths relative to `root`.
  ///
  /// A missing `root` is not an error, it simply holds no file.
  fn walk_files(&self, root: &Path) -> io::Result<Vec<PathBuf>>;
}
