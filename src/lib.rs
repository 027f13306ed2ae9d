pub mod catalog;
pub mod completion;
pub mod config;
pub mod error;
pub mod gateway;
pub mod interpret;
pub mod model;
pub mod optimizer;
pub mod prompt;
