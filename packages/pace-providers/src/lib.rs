pub mod weather;

mod error;

pub use error::{Error, Result};
