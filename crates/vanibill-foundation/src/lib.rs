pub mod clock;
pub mod error;
pub mod shutdown;

pub use clock::*;
pub use error::*;
pub use shutdown::*;
