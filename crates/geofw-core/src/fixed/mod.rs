pub mod codec;
pub mod count;

pub use codec::Field;
pub use count::{interpret, CountSemantics, Header};
