pub mod error;
pub mod logger;
pub mod startup;


pub use error::{Result, ServerError};
pub use startup::build_server;
