// gsmsim-rs/gsmsim/src/card/mod.rs

mod info;
pub use info::{CardInfo, ServiceProviderName, decode_imsi, decode_spn};

pub mod builder;
pub mod config;
pub mod operations;
pub mod session;
pub mod state;

pub use builder::SessionBuilder;
pub use config::SessionConfig;
pub use operations::AuthResult;
pub use session::{CardSession, Closed, Open};
pub use state::SessionState;
