pub mod content_blocking;
pub mod database;
pub mod http;
pub mod repositories;
pub mod storage;
