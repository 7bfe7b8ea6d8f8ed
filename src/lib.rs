pub mod api;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod groups;
pub mod logging;
pub mod lookup;
pub mod roles;
pub mod users;
