mod rpc;

#[cfg(test)]
pub mod mock_registry;

pub use rpc::*;
