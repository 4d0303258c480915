pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::DispatchError;
pub use server::McpSearchServer;
