pub mod format;
mod output;

pub use output::Output;
