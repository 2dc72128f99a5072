pub mod config;
pub mod link;

pub use config::WsConfig;
pub use link::{DeviceLink, LinkError};
