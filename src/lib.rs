pub mod error;
pub mod flags;
pub mod shell;

pub mod core;
pub mod filesystem;
pub mod highlight;
pub mod input;
pub mod logging;
pub mod path;

#[cfg(test)]
mod testing;
