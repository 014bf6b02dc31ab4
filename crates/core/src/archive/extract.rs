use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::shared::constants::STREAM_CHUNK_SIZE;

use super::ArchiveError;

/// Streams a single archive entry (exact name match) to `destination`.
///
/// The payload is written to a uniquely-named temporary file in the
/// destination directory and renamed into place, so a concurrent reader
/// never observes a half-written file. Parent directories are created as
/// needed.
pub fn extract(
    archive_path: &Path,
    entry_path: &str,
    destination: &Path,
) -> Result<(), ArchiveError> {
    let io_err = |e: std::io::Error| ArchiveError::ExtractionFailed {
        entry: entry_path.to_string(),
        destination: destination.to_path_buf(),
        source: e,
    };

    let parent = destination.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(io_err)?;

    let file = File::open(archive_path).map_err(|e| ArchiveError::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| ArchiveError::Archive {
        path: archive_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut entry = archive.by_name(entry_path).map_err(|e| match e {
        ZipError::FileNotFound => ArchiveError::EntryNotFound {
            path: archive_path.to_path_buf(),
            pattern: entry_path.to_string(),
        },
        other => ArchiveError::Archive {
            path: archive_path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
    let mut buf = vec![0u8; STREAM_CHUNK_SIZE];
    loop {
        let n = entry.read(&mut buf).map_err(io_err)?;
        if n == 0 {
            break;
        }
        tmp.write_all(&buf[..n]).map_err(io_err)?;
    }
    tmp.flush().map_err(io_err)?;

    // A stale destination must go first so the rename also lands on Windows.
    if destination.exists() {
        fs::remove_file(destination).map_err(io_err)?;
    }
    tmp.persist(destination).map_err(|e| io_err(e.error))?;

    log::debug!(
        "extracted {} to {}",
        entry_path,
        destination.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::integrity::{decide, CacheDecision};
    use std::path::PathBuf;

    fn write_archive(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("runtime.zip");
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, data) in entries {
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_extracts_entry_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), &[("pkg/linux/x86_64/lib_test.so", b"payload")]);
        let dest = dir.path().join("lib_test.so");

        extract(&archive, "pkg/linux/x86_64/lib_test.so", &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), &[("pkg/lib.so", b"x")]);
        let dest = dir.path().join("a/b/c/lib.so");

        extract(&archive, "pkg/lib.so", &dest).unwrap();
        assert!(dest.exists());
    }

    #[test]
    fn test_exact_match_only() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), &[("pkg/lib_test.so", b"x")]);
        let dest = dir.path().join("lib.so");

        // A prefix of an existing entry name is not a match.
        let err = extract(&archive, "pkg/lib_test", &dest).unwrap_err();
        assert!(matches!(err, ArchiveError::EntryNotFound { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_replaces_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), &[("pkg/lib.so", b"fresh bytes")]);
        let dest = dir.path().join("lib.so");
        fs::write(&dest, b"stale bytes").unwrap();

        extract(&archive, "pkg/lib.so", &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"fresh bytes");
    }

    #[test]
    fn test_extract_then_decide_is_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let content: Vec<u8> = (0..=255u8).cycle().take(100_000).collect();
        let archive = write_archive(dir.path(), &[("pkg/lib.so", &content)]);
        let dest = dir.path().join("lib.so");

        extract(&archive, "pkg/lib.so", &dest).unwrap();
        let decision = decide(&dest, crc32fast::hash(&content)).unwrap();
        assert_eq!(decision, CacheDecision::UpToDate);
    }

    #[test]
    fn test_no_partial_file_on_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), &[("pkg/other.so", b"x")]);
        let dest = dir.path().join("lib.so");

        assert!(extract(&archive, "pkg/lib.so", &dest).is_err());
        assert!(!dest.exists());
    }
}
