use std::path::PathBuf;

use serde::Serialize;

use crate::TransformMethod;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedBundle {
  pub src: PathBuf,
  pub dest: PathBuf,
  pub source_map: PathBuf,
  pub method: TransformMethod,
}
