pub mod traits;

// Record store implementations
pub mod http;
pub mod memory;
