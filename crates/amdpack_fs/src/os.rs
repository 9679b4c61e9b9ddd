use std::{
  fs, io,
  path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::FileSystem;

#[derive(Default, Clone, Copy, Debug)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn is_dir(&self, path: &Path) -> bool {
    path.is_dir()
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
  }

  fn walk_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
      return Ok(vec![]);
    }

    let mut files = vec![];
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
      let entry = entry?;
      if entry.file_type().is_dir() {
        continue;
      }
      if let Ok(relative) = entry.path().strip_prefix(root) {
        files.push(relative.to_path_buf());
      }
    }
    Ok(files)
  }
}
