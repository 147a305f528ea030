pub mod memory;
pub mod traits;

pub use memory::MemoryRecordStore;
pub use traits::RecordStore;
