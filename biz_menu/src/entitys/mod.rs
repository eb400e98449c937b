pub mod menu_entity;
pub mod menu_node;
pub mod route_entity;
