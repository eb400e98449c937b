pub mod component_registry;
pub mod register_routes;
pub mod route_table;
pub mod routes_alias;
