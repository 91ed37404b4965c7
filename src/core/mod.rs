pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod fanout;
pub mod params;
pub mod patch;
pub mod queue;
pub mod visual;
pub mod widgets;

pub use analysis::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use fanout::*;
pub use params::*;
pub use patch::*;
pub use queue::*;
pub use visual::*;
pub use widgets::*;

// Tunnel pass shader
pub static TUNNEL_WGSL: &str = include_str!("../../shaders/tunnel.wgsl");
