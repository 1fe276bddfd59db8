pub mod block;
pub mod document;
pub mod section;
pub mod xs;

pub use document::GeometryDocument;
pub use section::{locate, locate_in, SectionSpan};
pub use xs::{NodeRef, XsId};
