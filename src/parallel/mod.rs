pub mod pool;

pub use pool::{BuiltPool, WorkerPool};
