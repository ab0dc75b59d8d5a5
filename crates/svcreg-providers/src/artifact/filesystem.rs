//! Filesystem artifact service implementation
//!
//! Stores artifact versions under a root directory:
//!
//! ```text
//! <root>/<app>/<user>/<session | "user">/<filename>/<version>.bin
//!                                                  /<version>.json
//! ```
//!
//! Path segments are form-encoded so names containing `/`, `:` or `..` stay
//! inside their own directory.

use crate::constants::{
    FILE_ARTIFACT_DATA_EXTENSION, FILE_ARTIFACT_META_EXTENSION, FILE_ARTIFACT_PROVIDER,
    FILE_ARTIFACT_ROOT_PARAM, FILE_ARTIFACT_USER_DIR,
};
use crate::utils::decode_path;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use svcreg_domain::entities::{Artifact, ArtifactScope, is_user_scoped};
use svcreg_domain::error::{Error, Result};
use svcreg_domain::ports::ArtifactService;
use tokio::sync::Mutex;
use tracing::debug;

/// Metadata stored next to each artifact version
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VersionMeta {
    mime_type: String,
}

/// Filesystem artifact service
#[derive(Debug, Clone)]
pub struct FileArtifactService {
    root: PathBuf,
    /// Serializes version allocation within this process
    write_lock: Arc<Mutex<()>>,
}

// File utility helpers
mod file_utils {
    use svcreg_domain::error::{Error, Result};
    use std::path::Path;

    pub fn encode_segment(segment: &str) -> String {
        match segment {
            "." => "%2E".to_string(),
            ".." => "%2E%2E".to_string(),
            _ => url::form_urlencoded::byte_serialize(segment.as_bytes()).collect(),
        }
    }

    pub fn decode_segment(encoded: &str) -> Option<String> {
        url::form_urlencoded::parse(encoded.as_bytes())
            .next()
            .map(|(name, _)| name.into_owned())
    }

    pub async fn read_dir_names(path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut dir = match tokio::fs::read_dir(path).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => {
                return Err(Error::io_with_source(
                    format!("Failed to list {}", path.display()),
                    e,
                ));
            }
        };
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to list {}", path.display()), e))?
        {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

impl FileArtifactService {
    /// Open (creating if needed) an artifact store rooted at `root`
    ///
    /// Performs blocking I/O; call from a blocking context.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(Error::invalid_argument("artifact root directory is empty"));
        }
        std::fs::create_dir_all(&root).map_err(|e| {
            Error::io_with_source(format!("Failed to create {}", root.display()), e)
        })?;
        debug!(root = %root.display(), "Opened file artifact store");
        Ok(Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scope_dir(&self, scope: &ArtifactScope, user_scoped: bool) -> PathBuf {
        let last = if user_scoped {
            FILE_ARTIFACT_USER_DIR
        } else {
            scope.session_id.as_str()
        };
        self.root
            .join(file_utils::encode_segment(&scope.app_name))
            .join(file_utils::encode_segment(&scope.user_id))
            .join(file_utils::encode_segment(last))
    }

    fn artifact_dir(&self, scope: &ArtifactScope, filename: &str) -> PathBuf {
        self.scope_dir(scope, is_user_scoped(filename))
            .join(file_utils::encode_segment(filename))
    }

    async fn versions_in(dir: &Path) -> Result<Vec<u64>> {
        let mut versions: Vec<u64> = file_utils::read_dir_names(dir)
            .await?
            .iter()
            .filter_map(|name| {
                name.strip_suffix(FILE_ARTIFACT_DATA_EXTENSION)
                    .and_then(|stem| stem.strip_suffix('.'))
                    .and_then(|stem| stem.parse().ok())
            })
            .collect();
        versions.sort_unstable();
        Ok(versions)
    }

    async fn filenames_in(dir: &Path) -> Result<Vec<String>> {
        Ok(file_utils::read_dir_names(dir)
            .await?
            .iter()
            .filter_map(|name| file_utils::decode_segment(name))
            .collect())
    }
}

#[async_trait]
impl ArtifactService for FileArtifactService {
    async fn save_artifact(
        &self,
        scope: &ArtifactScope,
        filename: &str,
        artifact: Artifact,
    ) -> Result<u64> {
        let dir = self.artifact_dir(scope, filename);
        let _guard = self.write_lock.lock().await;

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to create {}", dir.display()), e))?;
        let version = Self::versions_in(&dir)
            .await?
            .last()
            .map_or(0, |latest| latest + 1);

        let meta = serde_json::to_vec(&VersionMeta {
            mime_type: artifact.mime_type,
        })?;
        let meta_path = dir.join(format!("{version}.{FILE_ARTIFACT_META_EXTENSION}"));
        tokio::fs::write(&meta_path, meta)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to write {}", meta_path.display()), e))?;
        let data_path = dir.join(format!("{version}.{FILE_ARTIFACT_DATA_EXTENSION}"));
        tokio::fs::write(&data_path, artifact.data)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to write {}", data_path.display()), e))?;

        debug!(filename, version, "Saved artifact");
        Ok(version)
    }

    async fn load_artifact(
        &self,
        scope: &ArtifactScope,
        filename: &str,
        version: Option<u64>,
    ) -> Result<Option<Artifact>> {
        let dir = self.artifact_dir(scope, filename);
        let version = match version {
            Some(v) => v,
            None => match Self::versions_in(&dir).await?.last() {
                Some(latest) => *latest,
                None => return Ok(None),
            },
        };

        let data_path = dir.join(format!("{version}.{FILE_ARTIFACT_DATA_EXTENSION}"));
        let data = match tokio::fs::read(&data_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::io_with_source(
                    format!("Failed to read {}", data_path.display()),
                    e,
                ));
            }
        };
        let meta_path = dir.join(format!("{version}.{FILE_ARTIFACT_META_EXTENSION}"));
        let meta: VersionMeta = match tokio::fs::read(&meta_path).await {
            Ok(raw) => serde_json::from_slice(&raw)?,
            Err(e) => {
                return Err(Error::io_with_source(
                    format!("Failed to read {}", meta_path.display()),
                    e,
                ));
            }
        };

        Ok(Some(Artifact::new(data, meta.mime_type)))
    }

    async fn list_artifact_keys(&self, scope: &ArtifactScope) -> Result<Vec<String>> {
        let mut keys = Self::filenames_in(&self.scope_dir(scope, false)).await?;
        keys.extend(Self::filenames_in(&self.scope_dir(scope, true)).await?);
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }

    async fn delete_artifact(&self, scope: &ArtifactScope, filename: &str) -> Result<()> {
        let dir = self.artifact_dir(scope, filename);
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_with_source(
                format!("Failed to delete {}", dir.display()),
                e,
            )),
        }
    }

    async fn list_versions(&self, scope: &ArtifactScope, filename: &str) -> Result<Vec<u64>> {
        Self::versions_in(&self.artifact_dir(scope, filename)).await
    }

    fn provider_name(&self) -> &str {
        FILE_ARTIFACT_PROVIDER
    }
}

/// Root directory from a `file:` identifier: `?root=` wins over the path
pub(crate) fn root_from_descriptor(
    descriptor: &ParsedDescriptor,
    query: &QueryParams,
) -> Result<PathBuf> {
    if let Some(root) = query.get(FILE_ARTIFACT_ROOT_PARAM).filter(|r| !r.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    match descriptor.path.as_str() {
        "" | "/" => Err(Error::invalid_argument(
            "file artifact store needs a root directory (file:///path or ?root=)",
        )),
        path => decode_path(path),
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use svcreg_application::ports::registry::{SERVICE_SCHEMES, SchemeEntry};
use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance};

/// Factory function for creating filesystem artifact service instances.
fn file_artifact_factory(descriptor: &ParsedDescriptor, query: &QueryParams) -> Result<ServiceInstance> {
    query.ensure_only(&[FILE_ARTIFACT_ROOT_PARAM])?;
    let root = root_from_descriptor(descriptor, query)?;
    let service: Arc<dyn ArtifactService> = Arc::new(FileArtifactService::open(root)?);
    Ok(ServiceInstance::from_port(service))
}

#[linkme::distributed_slice(SERVICE_SCHEMES)]
static FILE_ARTIFACT: SchemeEntry = SchemeEntry {
    kind: "artifact",
    scheme: "file",
    description: "Versioned artifacts on the local filesystem (file:///dir or ?root=)",
    factory: file_artifact_factory,
};
