use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::archive::extract::extract;
use crate::archive::index::{find_entry, ArchiveEntryRef};
use crate::archive::ArchiveError;
use crate::cache::integrity::{decide, CacheDecision, IntegrityError};
use crate::platform::descriptor::{PlatformDescriptor, PlatformError};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error("archive {0} has no parent directory to cache into")]
    NoCacheDir(PathBuf),
}

/// Outcome of a resolution run: the verified on-disk library plus what the
/// resolver had to do to get it there.
#[derive(Debug)]
pub struct ResolvedLibrary {
    pub path: PathBuf,
    pub entry: ArchiveEntryRef,
    pub decision: CacheDecision,
    pub extracted: bool,
}

/// Resolves the platform-specific runtime library out of a packaged
/// archive into a cache file next to the archive.
///
/// Stages run in order and fail fast: platform classification, archive
/// entry lookup, integrity check, extraction. No stage retries.
pub struct RuntimeResolver {
    archive_path: PathBuf,
    namespace: String,
    lib_stem: String,
}

impl RuntimeResolver {
    pub fn new(archive_path: &Path, namespace: &str, lib_stem: &str) -> Self {
        Self {
            archive_path: archive_path.to_path_buf(),
            namespace: namespace.to_string(),
            lib_stem: lib_stem.to_string(),
        }
    }

    /// Resolves for the running process's platform.
    pub fn resolve(&self) -> Result<ResolvedLibrary, ResolveError> {
        self.resolve_for(PlatformDescriptor::current()?)
    }

    /// Resolves for an explicit platform descriptor.
    pub fn resolve_for(&self, platform: PlatformDescriptor) -> Result<ResolvedLibrary, ResolveError> {
        log::debug!("resolving runtime for {platform:?}");

        let prefix = platform.library_prefix(&self.namespace);
        let extension = platform.library_extension();
        let entry = find_entry(&self.archive_path, &prefix, &self.lib_stem, extension)?;
        log::info!(
            "runtime library entry: {} ({} bytes)",
            entry.relative_path,
            entry.size_bytes
        );

        // The cache is keyed by filename only, next to the archive.
        let file_name = entry
            .relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&entry.relative_path);
        let cache_dir = self
            .archive_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ResolveError::NoCacheDir(self.archive_path.clone()))?;
        let destination = cache_dir.join(file_name);

        let decision = decide(&destination, entry.crc32)?;
        let extracted = match &decision {
            CacheDecision::UpToDate => {
                log::debug!("cached runtime at {} is current", destination.display());
                false
            }
            CacheDecision::Missing => {
                extract(&self.archive_path, &entry.relative_path, &destination)?;
                true
            }
            CacheDecision::Stale { reason } => {
                log::info!("re-extracting stale runtime: {reason}");
                extract(&self.archive_path, &entry.relative_path, &destination)?;
                true
            }
        };

        Ok(ResolvedLibrary {
            path: destination,
            entry,
            decision,
            extracted,
        })
    }
}
