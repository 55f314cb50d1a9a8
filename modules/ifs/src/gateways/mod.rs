pub mod local;

pub use local::IfsLocalClient;
