pub mod config;
pub mod logging;

pub mod error;
pub mod fetch;
pub mod install;
pub mod pipeline;
pub mod remote;
pub mod resolver;
pub mod retry;
pub mod scheduler;
pub mod types;
pub mod workspace;
