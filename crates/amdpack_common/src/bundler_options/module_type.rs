use std::{fmt::Display, str::FromStr};

use amdpack_error::PackError;
use phf::phf_map;

/// The kinds of AMD modules that can be resolved from the file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
  Js,
  Css,
  Tpl,
  Json,
}

static SUPPORTED_MODULE_TYPES: phf::Map<&'static str, ModuleType> = phf_map! {
  "js" => ModuleType::Js,
  "css" => ModuleType::Css,
  "tpl" => ModuleType::Tpl,
  "json" => ModuleType::Json,
};

impl ModuleType {
  pub const ALL: [ModuleType; 4] = [Self::Js, Self::Css, Self::Tpl, Self::Json];

  pub fn file_extension(self) -> &'static str {
    match self {
      Self::Js => "js",
      Self::Css => "css",
      Self::Tpl => "tpl",
      Self::Json => "json",
    }
  }

  /// The loader plugin prefix, ie. `css!`.
  pub fn amd_loader(self) -> &'static str {
    match self {
      Self::Js => "",
      Self::Css => "css!",
      Self::Tpl => "tpl!",
      Self::Json => "json!",
    }
  }

  /// Whether the module id keeps the file suffix. Only JSON modules do.
  pub fn keeps_file_extension(self) -> bool {
    matches!(self, Self::Json)
  }

  pub fn supported_names() -> String {
    Self::ALL.iter().map(|ty| ty.file_extension()).collect::<Vec<_>>().join(",")
  }
}

impl FromStr for ModuleType {
  type Err = PackError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    SUPPORTED_MODULE_TYPES.get(s).copied().ok_or_else(|| PackError::UnsupportedModuleType {
      name: s.to_string(),
      supported: Self::supported_names(),
    })
  }
}

impl Display for ModuleType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.file_extension())
  }
}
