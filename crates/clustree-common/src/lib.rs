pub mod error;
pub mod id;
pub mod linalg;
pub mod store;
pub mod value;

pub use error::*;
pub use id::*;
pub use linalg::*;
pub use store::*;
pub use value::*;
