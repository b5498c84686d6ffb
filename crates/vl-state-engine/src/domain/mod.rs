pub mod authorize;
pub mod entities;
pub mod errors;
pub mod ledger;
pub mod path;
pub mod store;
pub mod validation;

pub use authorize::*;
pub use entities::*;
pub use errors::*;
pub use ledger::*;
pub use path::*;
pub use store::*;
pub use validation::*;
