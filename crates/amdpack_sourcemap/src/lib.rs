mod css_paths;
mod module_create;

pub use crate::{
  css_paths::{resolve_css_paths, ResolvedCssMaps},
  module_create::{fix_module_create, MODULE_CREATE_SOURCE},
};
