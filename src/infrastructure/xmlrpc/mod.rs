pub mod client;
pub mod codec;

pub use client::{DirectoryReply, PingClient, RpcError, XmlRpcPingClient};

#[cfg(test)]
pub use client::MockPingClient;
