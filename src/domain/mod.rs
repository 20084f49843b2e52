pub mod notification;
pub mod transformer;
pub mod types;

pub use notification::*;
pub use transformer::*;
pub use types::*;
