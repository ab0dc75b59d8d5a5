//! Service Registry System
//!
//! Defines the auto-registration infrastructure for schemes and dynamic
//! import modules. Uses the `linkme` crate for compile-time registration of
//! entries that are discovered at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Scheme Registration Flow                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(SCHEMES)]    │
//! │                        static ENTRY: SchemeEntry = ...          │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static SERVICE_SCHEMES: [..] = [..]  │
//! │                              ↓                                  │
//! │  3. SchemeRegistry::with_builtins() copies every entry          │
//! │                              ↓                                  │
//! │  4. Identifier selects: "inmemory://" → InMemorySessionService  │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Registering a Scheme (in svcreg-providers)
//!
//! ```ignore
//! use svcreg_application::ports::registry::{SchemeEntry, SERVICE_SCHEMES};
//!
//! #[linkme::distributed_slice(SERVICE_SCHEMES)]
//! static INMEMORY_SESSION: SchemeEntry = SchemeEntry {
//!     kind: "session",
//!     scheme: "inmemory",
//!     description: "In-process session store",
//!     factory: |_descriptor, _query| Ok(ServiceInstance::from_port(..)),
//! };
//! ```
//!
//! ### Resolving a Service (in svcreg-infrastructure)
//!
//! ```ignore
//! use svcreg_application::use_cases::load_service;
//!
//! let sessions = load_service(Some("inmemory://"), "session")?;
//! ```

pub mod module;
pub mod scheme;

// Re-export all registry types and functions
pub use module::{
    Export, ModuleEntry, ModuleExports, SERVICE_MODULES, SchemeDeclaration, list_service_modules,
};
pub use scheme::{
    ConstructorFn, SERVICE_SCHEMES, SchemeEntry, construct, constructor, list_service_schemes,
};
