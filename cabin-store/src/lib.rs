pub mod app_config;
pub mod memory;

pub use memory::MemoryStore;
