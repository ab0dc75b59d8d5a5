//! Memory service implementations
//!
//! | Provider | Scheme | Description |
//! |----------|--------|-------------|
//! | [`InMemoryMemoryService`] | `inmemory` | Keyword recall over remembered sessions |

pub mod in_memory;

pub use in_memory::InMemoryMemoryService;
