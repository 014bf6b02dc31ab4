use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::STREAM_CHUNK_SIZE;

#[derive(Error, Debug)]
pub enum IntegrityError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whether an on-disk file already matches an archive entry's checksum.
///
/// `UpToDate` guarantees the byte sequences are identical up to CRC32
/// collision, which is an accepted trade-off for a startup-time check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheDecision {
    UpToDate,
    Stale { reason: String },
    Missing,
}

/// Compares `target`'s streaming CRC32 against `expected_crc32`.
///
/// Read-only; the caller decides whether to rewrite the file.
pub fn decide(target: &Path, expected_crc32: u32) -> Result<CacheDecision, IntegrityError> {
    let mut file = match File::open(target) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CacheDecision::Missing),
        Err(e) => {
            return Err(IntegrityError::Io {
                path: target.to_path_buf(),
                source: e,
            })
        }
    };

    let mut hasher = crc32fast::Hasher::new();
    let mut buf = vec![0u8; STREAM_CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(|e| IntegrityError::Io {
            path: target.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let actual = hasher.finalize();

    if actual == expected_crc32 {
        Ok(CacheDecision::UpToDate)
    } else {
        Ok(CacheDecision::Stale {
            reason: format!(
                "checksum {actual:#010x} does not match recorded {expected_crc32:#010x}"
            ),
        })
    }
}
