pub mod duration;
pub mod manual;
pub mod pay;
pub mod session;
pub mod summary;
