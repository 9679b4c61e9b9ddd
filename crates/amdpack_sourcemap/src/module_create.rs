use serde_json::Value;

pub const MODULE_CREATE_SOURCE: &str = "module-create.js";

/// Renames the trailing `module-create.js` source of a v3 source map.
///
/// The engine records modules created on the fly with a path relative to its work directory,
/// ie. `../../../../module-create.js`, which means nothing next to the published bundle.
/// Any other map, including an empty one, is returned untouched.
pub fn fix_module_create(source_map: &str) -> anyhow::Result<String> {
  if source_map.is_empty() {
    return Ok(String::new());
  }

  let mut map: Value = serde_json::from_str(source_map)?;
  let is_v3 = map.get("version").and_then(Value::as_u64) == Some(3);

  let last_source = map
    .get_mut("sources")
    .and_then(Value::as_array_mut)
    .and_then(|sources| sources.last_mut())
    .filter(|source| source.as_str().is_some_and(|source| source.ends_with(MODULE_CREATE_SOURCE)));

  match last_source {
    Some(source) if is_v3 => {
      *source = Value::from(MODULE_CREATE_SOURCE);
      Ok(serde_json::to_string(&map)?)
    }
    _ => Ok(source_map.to_string()),
  }
}
