pub mod connection;
pub mod error;

pub use connection::connect_pool;
pub use error::{describe_error, DbError};
