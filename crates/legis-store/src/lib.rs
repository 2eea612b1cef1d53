pub mod index;
pub mod store;

pub use index::*;
pub use store::*;
