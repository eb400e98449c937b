pub mod biz_service;
pub mod convert;
pub mod entitys;
pub mod manager;
pub mod router;
