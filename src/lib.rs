pub mod bridge;
pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod http;
pub mod middleware;
pub mod server;

pub use context::ServiceContext;
pub use server::Server;
