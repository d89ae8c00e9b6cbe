pub mod init;
pub mod utils;

pub use init::connect;
