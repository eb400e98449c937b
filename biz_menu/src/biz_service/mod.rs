pub mod menu_service;
