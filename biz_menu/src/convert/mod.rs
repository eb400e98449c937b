pub mod duplicate_checker;
pub mod menu_normalizer;
pub mod path_resolver;
