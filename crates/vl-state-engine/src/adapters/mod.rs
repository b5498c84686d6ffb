pub mod json_codec;
pub mod policy;

pub use json_codec::*;
pub use policy::*;
