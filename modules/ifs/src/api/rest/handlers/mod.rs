mod journals;
mod parts;
mod relationships;
mod system;

pub use journals::*;
pub use parts::*;
pub use relationships::*;
pub use system::*;
