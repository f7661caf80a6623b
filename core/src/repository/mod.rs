pub mod file;
pub mod memory;
pub mod tasks;
pub mod traits;

// Re-export
pub use file::FileStore;
pub use memory::MemoryStore;
pub use tasks::FileTaskRepository;
pub use traits::{KeyValueStore, TaskRepository};
