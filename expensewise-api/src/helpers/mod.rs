pub mod database;
pub mod expense_filter;
pub mod password;
pub mod session;
pub mod storage;
