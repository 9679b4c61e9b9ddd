// Expands AMD module patterns, ie. `taoQtiTest/runner/**/*`, against the file system.

mod alias;
mod glob_pattern;
mod resolver;

pub use crate::{
  alias::find_alias,
  glob_pattern::{has_wildcard, split_glob_base},
  resolver::Resolver,
};

pub use amdpack_common::{ModuleId, ModuleType, ResolveOptions};
