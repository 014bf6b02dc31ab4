use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use libloading::Library;
use thiserror::Error;

use crate::shared::constants::RUNTIME_VERSION_SYMBOL;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load native library {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("native runtime already loaded from {loaded}, refusing {requested}")]
    RuntimeMismatch { loaded: PathBuf, requested: PathBuf },
}

/// Process-wide handle over the loaded native runtime.
///
/// The underlying library handle lives for the remainder of the process;
/// there is no unload path. Holding a `&'static LoadedRuntime` is proof
/// that the runtime is loaded and callable.
#[derive(Debug)]
pub struct LoadedRuntime {
    library: Library,
    path: PathBuf,
}

impl LoadedRuntime {
    fn open(path: &Path) -> Result<Self, LoadError> {
        // Safety: loading a shared object runs its initializers. The file
        // has already been checksum-verified against the bundled archive.
        let library = unsafe { Library::new(path) }.map_err(|e| LoadError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            library,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Calls the runtime's version entry point, if exported.
    ///
    /// Purely diagnostic: confirms the expected library is active, never
    /// fails the load.
    fn probe_version_symbol(&self) {
        type VersionEntry = unsafe extern "C" fn() -> *const c_void;
        let symbol = unsafe {
            self.library
                .get::<VersionEntry>(RUNTIME_VERSION_SYMBOL.as_bytes())
        };
        match symbol {
            Ok(entry) => {
                let api_base = unsafe { entry() };
                if api_base.is_null() {
                    log::warn!(
                        "{} returned null from {}",
                        self.path.display(),
                        RUNTIME_VERSION_SYMBOL
                    );
                } else {
                    log::info!("native runtime active: {}", self.path.display());
                }
            }
            Err(_) => {
                log::warn!(
                    "{} does not export {}",
                    self.path.display(),
                    RUNTIME_VERSION_SYMBOL
                );
            }
        }
    }
}

static RUNTIME: OnceLock<LoadedRuntime> = OnceLock::new();

/// Loads the runtime at `path` into the process, at most once.
///
/// A second call with the same path returns the existing handle; a call
/// with a different path fails, since two runtime builds must never be
/// loaded into one process. Failed loads do not latch, so a later call may
/// retry with a corrected path.
pub fn load_once(path: &Path) -> Result<&'static LoadedRuntime, LoadError> {
    if let Some(runtime) = RUNTIME.get() {
        return if runtime.path == path {
            Ok(runtime)
        } else {
            Err(LoadError::RuntimeMismatch {
                loaded: runtime.path.clone(),
                requested: path.to_path_buf(),
            })
        };
    }

    let runtime = LoadedRuntime::open(path)?;
    runtime.probe_version_symbol();

    // A concurrent racer may have latched first; its handle wins and the
    // duplicate library reference is released.
    let stored = RUNTIME.get_or_init(|| runtime);
    if stored.path == path {
        Ok(stored)
    } else {
        Err(LoadError::RuntimeMismatch {
            loaded: stored.path.clone(),
            requested: path.to_path_buf(),
        })
    }
}
