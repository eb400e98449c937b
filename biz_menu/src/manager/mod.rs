pub mod menu_manager;
pub mod menu_manager_impl;
