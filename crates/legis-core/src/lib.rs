pub mod endpoints;
pub mod error;
pub mod jurisdiction;
pub mod location;
pub mod snapshot;
pub mod stamp;

pub use endpoints::*;
pub use error::*;
pub use jurisdiction::*;
pub use location::*;
pub use snapshot::*;
pub use stamp::*;
