//! Domain types shared by the HTTP service, the storage layer and the client.

pub mod memory;
pub mod store;
pub mod todo;

pub use memory::MemoryStore;
pub use store::{StoreError, TodoStore};
pub use todo::{TitleError, Todo, TodoId, TodoTitle};
