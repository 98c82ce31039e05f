pub mod kv;

pub use kv::KeyValueDir;
