pub mod config;
pub mod logging;

pub mod catalog;
pub mod fetcher;
pub mod http;
pub mod layout;
pub mod links;
pub mod pipeline;
pub mod resolver;
pub mod storage;
