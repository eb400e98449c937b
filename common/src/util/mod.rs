pub mod log_util;
pub mod page_util;
