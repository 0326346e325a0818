pub mod connection;
pub mod mock;

pub use connection::{WalletBackend, WalletConnection};
