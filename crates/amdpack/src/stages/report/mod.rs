pub mod parse_build_log;
pub mod validate_reports;
