pub mod bundle_report;
pub mod engine_config;
pub mod extension;
pub mod module_id;
pub mod transformed_bundle;
