use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use super::ArchiveError;

/// Identifies one file inside an archive, as recorded in the central
/// directory. Produced without touching entry payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntryRef {
    pub relative_path: String,
    pub crc32: u32,
    pub size_bytes: u64,
}

/// Locates the unique entry whose path starts with `prefix + stem` and ends
/// with `"." + extension`.
///
/// The whole central directory is scanned; zero matches is
/// [`ArchiveError::EntryNotFound`], more than one is
/// [`ArchiveError::AmbiguousEntry`]. Entry payloads are never decompressed
/// during the scan.
pub fn find_entry(
    archive_path: &Path,
    prefix: &str,
    stem: &str,
    extension: &str,
) -> Result<ArchiveEntryRef, ArchiveError> {
    let file = File::open(archive_path).map_err(|e| ArchiveError::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| ArchiveError::Archive {
        path: archive_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let name_prefix = format!("{prefix}{stem}");
    let name_suffix = format!(".{extension}");

    let mut matches: Vec<ArchiveEntryRef> = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(|e| ArchiveError::Archive {
            path: archive_path.to_path_buf(),
            message: e.to_string(),
        })?;
        let name = entry.name();
        if name.starts_with(&name_prefix) && name.ends_with(&name_suffix) {
            matches.push(ArchiveEntryRef {
                relative_path: name.to_string(),
                crc32: entry.crc32(),
                size_bytes: entry.size(),
            });
        }
    }

    let pattern = format!("{name_prefix}*{name_suffix}");
    if matches.is_empty() {
        return Err(ArchiveError::EntryNotFound {
            path: archive_path.to_path_buf(),
            pattern,
        });
    }
    if matches.len() > 1 {
        return Err(ArchiveError::AmbiguousEntry {
            path: archive_path.to_path_buf(),
            pattern,
            matches: matches.into_iter().map(|m| m.relative_path).collect(),
        });
    }
    Ok(matches.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_archive(dir: &Path, entries: &[(&str, &[u8])]) -> std::path::PathBuf {
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
    fn test_finds_matching_entry() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(
            dir.path(),
            &[
                ("pkg/linux/x86_64/lib_test.so", b"native bytes"),
                ("pkg/macos/ARMv8/lib_test.dylib", b"other bytes"),
            ],
        );

        let entry = find_entry(&archive, "pkg/linux/x86_64/", "lib_test", "so").unwrap();
        assert_eq!(entry.relative_path, "pkg/linux/x86_64/lib_test.so");
        assert_eq!(entry.size_bytes, b"native bytes".len() as u64);
        assert_eq!(entry.crc32, crc32fast::hash(b"native bytes"));
    }

    #[test]
    fn test_stem_may_be_a_filename_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(
            dir.path(),
            &[("native/linux/x86_64/onnxruntime-1.17.so", b"payload")],
        );

        let entry = find_entry(&archive, "native/linux/x86_64/", "onnxruntime", "so").unwrap();
        assert_eq!(entry.relative_path, "native/linux/x86_64/onnxruntime-1.17.so");
    }

    #[test]
    fn test_extension_must_match() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(
            dir.path(),
            &[("pkg/linux/x86_64/lib_test.so.sha256", b"checksum file")],
        );

        let err = find_entry(&archive, "pkg/linux/x86_64/", "lib_test", "so").unwrap_err();
        assert!(matches!(err, ArchiveError::EntryNotFound { .. }));
    }

    #[test]
    fn test_missing_entry_reports_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), &[("pkg/macos/ARMv8/lib_test.dylib", b"x")]);

        let err = find_entry(&archive, "pkg/linux/x86_64/", "lib_test", "so").unwrap_err();
        assert!(err.to_string().contains("pkg/linux/x86_64/lib_test*.so"));
    }

    #[test]
    fn test_ambiguous_matches_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(
            dir.path(),
            &[
                ("pkg/linux/x86_64/lib_test.so", b"one"),
                ("pkg/linux/x86_64/lib_test4.so", b"two"),
            ],
        );

        let err = find_entry(&archive, "pkg/linux/x86_64/", "lib_test", "so").unwrap_err();
        match err {
            ArchiveError::AmbiguousEntry { matches, .. } => {
                assert_eq!(matches.len(), 2);
                assert!(matches.contains(&"pkg/linux/x86_64/lib_test.so".to_string()));
            }
            other => panic!("expected AmbiguousEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_archive_fails_to_open() {
        let err = find_entry(Path::new("/nonexistent/runtime.zip"), "pkg/", "lib", "so")
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Open { .. }));
    }

    #[test]
    fn test_garbage_file_is_not_an_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_zip.zip");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let err = find_entry(&path, "pkg/", "lib", "so").unwrap_err();
        assert!(matches!(err, ArchiveError::Archive { .. }));
    }
}
