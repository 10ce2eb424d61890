pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::client::{SessionEnd, run, run_session, run_with_config};
pub use frameworks::config::ClientConfig;
