pub mod directory_layout;
pub mod normalize_options;
