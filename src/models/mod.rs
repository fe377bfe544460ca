pub mod session;
pub mod summary;
pub mod work_log;
