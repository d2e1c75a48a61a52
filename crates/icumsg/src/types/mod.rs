mod part;
mod value;

pub use part::{FormatPart, Formatted};
pub use value::{Opaque, TagFn, Value};
