pub mod comparator;
pub mod structural;
pub mod text;

pub use comparator::*;
pub use structural::*;
pub use text::*;
