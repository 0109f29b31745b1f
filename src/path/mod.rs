mod resolver;

pub(crate) use resolver::normalize;
pub use resolver::{PathError, PathResolver};
