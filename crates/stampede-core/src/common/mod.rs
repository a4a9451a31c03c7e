pub mod error;
pub mod work;

pub use error::*;
pub use work::*;
