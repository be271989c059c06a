pub mod config;
pub mod error;
pub mod render;
pub mod scenario;

pub use config::{DemoConfig, LinkMode, OutputFormat, TxSpec};
pub use error::DemoError;
pub use scenario::build_chain;
