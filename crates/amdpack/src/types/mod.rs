use std::sync::Arc;

use amdpack_common::{ExtensionLocator, NormalizedBundlerOptions};

use crate::BundleEngine;

pub type SharedOptions = Arc<NormalizedBundlerOptions>;
pub type SharedLocator = Arc<dyn ExtensionLocator>;
pub type SharedEngine = Arc<dyn BundleEngine>;
