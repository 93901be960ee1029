/// End-to-end scanner integration tests.
///
/// These tests run the real walker, matcher and collector against a real
/// temporary filesystem. Oversized files are created with `set_len`, which
/// produces sparse files on every mainstream filesystem, so a "100 MiB" file
/// costs no disk space.
use largefiles_core::config::{ErrorPolicy, ScanConfig, MIB};
use largefiles_core::scanner::progress::ScanProgress;
use largefiles_core::scanner::{load_patterns, start_scan};
use largefiles_core::{IgnoreFileError, PatternSet, ScanError, Walker};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn sized_file(path: &Path, len: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::File::create(path).unwrap().set_len(len).unwrap();
}

fn write_ignore_file(root: &Path, contents: &str) {
    fs::write(root.join(".gitignore"), contents).unwrap();
}

/// Load the root's ignore file and walk it with `config`.
fn scan(root: &Path, config: ScanConfig) -> Result<Vec<(PathBuf, u64)>, ScanError> {
    let (patterns, _warning) = load_patterns(root, &config);
    let outcome = Walker::new(config, patterns).walk(root)?;
    let mut found: Vec<(PathBuf, u64)> = outcome
        .records
        .into_iter()
        .map(|r| (r.path().to_path_buf(), r.size_bytes()))
        .collect();
    found.sort();
    Ok(found)
}

fn relative(root: &Path, found: &[(PathBuf, u64)]) -> Vec<String> {
    found
        .iter()
        .map(|(p, _)| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

// ── Scenarios ────────────────────────────────────────────────────────────────

/// ```text
/// root/
///   .gitignore      "node_modules"
///   big.bin         60 MiB
///   small.txt       1 KiB
///   node_modules/
///     huge.bin      100 MiB
/// ```
#[test]
fn ignored_directory_is_pruned_with_its_contents() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_ignore_file(root, "node_modules\n");
    sized_file(&root.join("big.bin"), 60 * MIB);
    sized_file(&root.join("small.txt"), 1024);
    sized_file(&root.join("node_modules").join("huge.bin"), 100 * MIB);

    let found = scan(root, ScanConfig::default()).unwrap();
    assert_eq!(relative(root, &found), vec!["big.bin"]);
    assert_eq!(found[0].1, 60 * MIB);
}

#[test]
fn missing_ignore_file_warns_and_scans_everything() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    sized_file(&root.join("a.bin"), 51 * MIB);
    sized_file(&root.join("node_modules").join("b.bin"), 70 * MIB);

    let config = ScanConfig::default();
    let (patterns, warning) = load_patterns(root, &config);
    assert!(patterns.is_empty());
    assert!(matches!(warning, Some(IgnoreFileError::NotFound { .. })));

    let found = scan(root, config).unwrap();
    assert_eq!(relative(root, &found), vec!["a.bin", "node_modules/b.bin"]);
}

#[test]
fn basename_pattern_excludes_matching_file() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_ignore_file(root, "# logs\n*.log\n");
    sized_file(&root.join("app.log"), 80 * MIB);
    sized_file(&root.join("nested").join("server.log"), 80 * MIB);
    sized_file(&root.join("app.dat"), 80 * MIB);

    let found = scan(root, ScanConfig::default()).unwrap();
    assert_eq!(relative(root, &found), vec!["app.dat"]);
}

#[test]
fn files_at_or_below_threshold_never_appear() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    sized_file(&root.join("exact.bin"), 50 * MIB);
    sized_file(&root.join("under.bin"), 50 * MIB - 1);
    sized_file(&root.join("over.bin"), 50 * MIB + 1);

    let found = scan(root, ScanConfig::default()).unwrap();
    assert_eq!(relative(root, &found), vec!["over.bin"]);
}

/// A full-path pattern prunes one specific directory while a same-named
/// directory elsewhere is still scanned.
#[test]
fn full_path_pattern_prunes_only_that_directory() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let pruned = root.join("data").join("cache");
    sized_file(&pruned.join("x.bin"), 60 * MIB);
    sized_file(&pruned.join("deeper").join("y.bin"), 60 * MIB);
    sized_file(&root.join("other").join("cache").join("z.bin"), 60 * MIB);

    let patterns = PatternSet::from_patterns([pruned.to_string_lossy().into_owned()]);
    let outcome = Walker::new(ScanConfig::default(), patterns)
        .walk(root)
        .unwrap();

    let names: Vec<_> = outcome
        .records
        .iter()
        .map(|r| r.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["z.bin"]);
    assert_eq!(outcome.stats.dirs_pruned, 1);
}

#[test]
fn malformed_patterns_do_not_abort_the_scan() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_ignore_file(root, "[broken\n*.iso\n");
    sized_file(&root.join("[broken"), 60 * MIB);
    sized_file(&root.join("disk.iso"), 60 * MIB);

    let found = scan(root, ScanConfig::default()).unwrap();
    assert_eq!(relative(root, &found), vec!["[broken"]);
}

#[test]
fn custom_threshold_and_ignore_file_name() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join(".scanignore"), "skip\n").unwrap();
    write_ignore_file(root, "*.bin\n");
    sized_file(&root.join("a.bin"), 2 * MIB);
    sized_file(&root.join("skip").join("b.bin"), 2 * MIB);
    sized_file(&root.join("c.bin"), MIB / 2);

    let config = ScanConfig::default()
        .with_threshold_mib(1)
        .with_ignore_file_name(".scanignore");
    let found = scan(root, config).unwrap();
    assert_eq!(relative(root, &found), vec!["a.bin"]);
}

// ── Properties ───────────────────────────────────────────────────────────────

#[test]
fn repeated_scans_return_the_same_set() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_ignore_file(root, "target\n");
    for i in 0..20 {
        sized_file(&root.join(format!("d{}", i % 4)).join(format!("f{i}.bin")), 51 * MIB + i);
    }
    sized_file(&root.join("target").join("skip.bin"), 99 * MIB);

    let first: HashSet<_> = scan(root, ScanConfig::default()).unwrap().into_iter().collect();
    let second: HashSet<_> = scan(root, ScanConfig::default()).unwrap().into_iter().collect();
    assert_eq!(first.len(), 20);
    assert_eq!(first, second);
}

/// Every qualifying file is reported exactly once even when well over a
/// thousand records are submitted concurrently.
#[test]
fn many_qualifying_files_are_each_reported_once() {
    const N: usize = 1_200;
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for i in 0..N {
        sized_file(&root.join(format!("bucket{}", i % 10)).join(format!("{i:04}.bin")), 16);
    }

    let config = ScanConfig::default().with_threshold_bytes(8).with_threads(4);
    let found = scan(root, config).unwrap();
    assert_eq!(found.len(), N);
    let unique: HashSet<_> = found.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(unique.len(), N);
}

#[test]
fn serial_and_parallel_walks_agree() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_ignore_file(root, "skip*\n");
    for i in 0..30 {
        let dir = if i % 3 == 0 { "skipme" } else { "keep" };
        sized_file(&root.join(dir).join(format!("f{i}.bin")), 100);
    }

    let serial = scan(root, ScanConfig::default().with_threshold_bytes(10).with_threads(1)).unwrap();
    let parallel = scan(root, ScanConfig::default().with_threshold_bytes(10).with_threads(4)).unwrap();
    assert_eq!(serial.len(), 20);
    assert_eq!(serial, parallel);
}

// ── Background scan ──────────────────────────────────────────────────────────

#[test]
fn background_scan_reports_complete_and_joins() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    sized_file(&root.join("big.bin"), 60 * MIB);

    let handle = start_scan(root.to_path_buf(), ScanConfig::default(), PatternSet::default()).unwrap();

    let mut saw_complete = false;
    for message in handle.progress_rx.iter() {
        if let ScanProgress::Complete { large_files, .. } = message {
            assert_eq!(large_files, 1);
            saw_complete = true;
        }
    }
    assert!(saw_complete, "scanner must send Complete before hanging up");

    let outcome = handle.join().unwrap();
    assert_eq!(outcome.records.len(), 1);
}

#[test]
fn background_scan_can_be_joined_without_draining() {
    let tmp = TempDir::new().unwrap();
    for i in 0..50 {
        sized_file(&tmp.path().join(format!("f{i}.bin")), 10);
    }

    let config = ScanConfig::default().with_threshold_bytes(1);
    let handle = start_scan(tmp.path().to_path_buf(), config, PatternSet::default()).unwrap();
    let outcome = handle.join().unwrap();
    assert_eq!(outcome.records.len(), 50);
}

#[test]
fn background_scan_propagates_traversal_error() {
    let tmp = TempDir::new().unwrap();
    let handle = start_scan(
        tmp.path().join("does-not-exist"),
        ScanConfig::default(),
        PatternSet::default(),
    )
    .unwrap();
    assert!(matches!(handle.join(), Err(ScanError::Traversal { .. })));
}

// ── Error policy ─────────────────────────────────────────────────────────────

#[cfg(unix)]
mod permissions {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Build a tree with one unreadable directory.
    ///
    /// Permission bits do not stop root, so these tests are ignored by
    /// default; run them as an unprivileged user with `--ignored`. The same
    /// code path is covered without privileges in `scanner::walker` tests.
    fn tree_with_locked_dir(root: &Path) -> PathBuf {
        sized_file(&root.join("a").join("big.bin"), 60 * MIB);
        sized_file(&root.join("z").join("big.bin"), 60 * MIB);
        let locked = root.join("m_locked");
        sized_file(&locked.join("hidden.bin"), 60 * MIB);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        assert!(
            fs::read_dir(&locked).is_err(),
            "{} is still readable; run these tests as a non-root user",
            locked.display()
        );
        locked
    }

    fn unlock(dir: &Path) {
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    #[ignore = "needs a non-root user; run with --ignored"]
    fn unreadable_directory_aborts_by_default() {
        let tmp = TempDir::new().unwrap();
        let locked = tree_with_locked_dir(tmp.path());

        let result = scan(tmp.path(), ScanConfig::default());
        unlock(&locked);

        match result {
            Err(ScanError::Traversal { path, .. }) => {
                assert_eq!(path.as_deref(), Some(locked.as_path()));
            }
            other => panic!("expected a traversal error, got {other:?}"),
        }
    }

    #[test]
    #[ignore = "needs a non-root user; run with --ignored"]
    fn unreadable_directory_is_skipped_when_continuing() {
        let tmp = TempDir::new().unwrap();
        let locked = tree_with_locked_dir(tmp.path());

        let config = ScanConfig::default().with_error_policy(ErrorPolicy::SkipAndContinue);
        let (patterns, _) = load_patterns(tmp.path(), &config);
        let outcome = Walker::new(config, patterns).walk(tmp.path());
        unlock(&locked);
        let outcome = outcome.unwrap();

        let mut found: Vec<_> = outcome
            .records
            .iter()
            .map(|r| r.path().to_path_buf())
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                tmp.path().join("a").join("big.bin"),
                tmp.path().join("z").join("big.bin"),
            ]
        );
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].path.as_deref(), Some(locked.as_path()));
    }
}
