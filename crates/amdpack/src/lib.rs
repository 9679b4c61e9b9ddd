mod bundler;
mod engine;
mod stages;
mod types;
mod utils;

pub use crate::{
  bundler::Bundler,
  engine::{command::CommandEngine, BundleEngine},
  stages::{
    report::parse_build_log::parse_build_log,
    transform::compressor::{
      CommandCompressor, CompressInput, CompressOutput, Compressor, PassThroughCompressor,
    },
  },
  utils::directory_layout::DirectoryLayout,
};
pub use amdpack_common::*;
pub use amdpack_error::{BuildError, BuildResult, PackError};
