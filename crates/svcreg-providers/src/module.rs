//! Built-in dynamic-import module
//!
//! Makes the bundled providers reachable through `python:` identifiers:
//!
//! ```text
//! python:svcreg.providers:InMemorySessionService
//! python:svcreg.providers:FileArtifactService?root=/tmp/artifacts
//! python:svcreg.providers:SqliteSessionService?path=/var/lib/sessions.db
//! ```

use crate::constants::PROVIDERS_MODULE_PATH;
use svcreg_application::ports::registry::{ModuleEntry, ModuleExports, SERVICE_MODULES};
use svcreg_domain::error::Result;

use crate::artifact::in_memory::in_memory_artifact_factory;
use crate::memory::in_memory::in_memory_memory_factory;
use crate::session::in_memory::in_memory_session_factory;

fn init_providers_module(exports: &mut ModuleExports) -> Result<()> {
    exports
        .export("InMemorySessionService", in_memory_session_factory)
        .export("InMemoryMemoryService", in_memory_memory_factory)
        .export("InMemoryArtifactService", in_memory_artifact_factory);

    #[cfg(feature = "session-sqlite")]
    exports.export(
        "SqliteSessionService",
        crate::session::sqlite::sqlite_session_module_factory,
    );

    #[cfg(feature = "artifact-filesystem")]
    exports.export("FileArtifactService", |_descriptor, query| {
        use crate::constants::FILE_ARTIFACT_ROOT_PARAM;
        use crate::artifact::FileArtifactService;
        use std::sync::Arc;
        use svcreg_domain::ports::ArtifactService;
        use svcreg_domain::value_objects::ServiceInstance;

        query.ensure_only(&[FILE_ARTIFACT_ROOT_PARAM])?;
        let root = query.require(FILE_ARTIFACT_ROOT_PARAM)?;
        let service: Arc<dyn ArtifactService> = Arc::new(FileArtifactService::open(root)?);
        Ok(ServiceInstance::from_port(service))
    });

    Ok(())
}

#[linkme::distributed_slice(SERVICE_MODULES)]
static PROVIDERS_MODULE: ModuleEntry = ModuleEntry {
    path: PROVIDERS_MODULE_PATH,
    description: "Bundled session, memory and artifact services",
    init: init_providers_module,
};
