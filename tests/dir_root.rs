mod common;

use adaptagrams_loader::{
    Bootstrapper, Error, PlatformSignals,
    lifecycle::NativeBundle,
    root::{DirRoot, InstallationRoot},
};
use common::{Calls, RecordingLoader, init_logger};
use std::{fs, path::PathBuf};
use tempfile::TempDir;

fn install(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not a real library").unwrap();
    }
    dir
}

#[test]
fn resolves_existing_files_only() {
    let dir = install(&["lib/linux64/adaptagrams.so"]);
    fs::create_dir_all(dir.path().join("lib/win64")).unwrap();
    let root = DirRoot::new(dir.path());

    let found = root.resolve("lib/linux64/adaptagrams.so").unwrap();
    assert!(found.is_absolute());
    assert!(found.ends_with("lib/linux64/adaptagrams.so"));
    assert!(root.resolve("lib/linux32/adaptagrams.so").is_none());
    // directories are not artifacts
    assert!(root.resolve("lib/win64").is_none());
}

#[test]
fn partial_windows_install_reports_first_gap() {
    init_logger();
    let dir = install(&["lib/win64/libwinpthread-1.dll", "lib/win64/adaptagrams.dll"]);
    let calls = Calls::default();
    let err = Bootstrapper::new()
        .signals(PlatformSignals::new("Windows 10", 64))
        .load(&DirRoot::new(dir.path()), RecordingLoader::new(&calls))
        .unwrap_err();

    assert!(
        matches!(&err, Error::ArtifactNotFound { path } if path == "lib/win64/libgcc_s_seh-1.dll"),
        "unexpected error: {err}"
    );
    assert_eq!(common::loads(&calls).len(), 1);
}

#[cfg(all(feature = "native", unix))]
#[test]
fn system_loader_rejects_garbage() {
    use adaptagrams_loader::loader::DylibLoader;
    use std::error::Error as _;

    init_logger();
    let dir = install(&["lib/linux64/adaptagrams.so"]);
    let root = DirRoot::new(dir.path());
    let err = Bootstrapper::new()
        .signals(PlatformSignals::new("Linux", 64))
        .load(&root, DylibLoader::new())
        .unwrap_err();

    match &err {
        Error::LoadFailed { path, location, .. } => {
            assert_eq!(path, "lib/linux64/adaptagrams.so");
            assert!(location.starts_with(dir.path().canonicalize().unwrap()));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.source().is_some());
}

#[cfg(feature = "native")]
#[test]
fn empty_install_fails_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    let err = adaptagrams_loader::bootstrap(&DirRoot::new(dir.path())).unwrap_err();
    assert!(matches!(
        err,
        Error::ArtifactNotFound { .. } | Error::UnsupportedPlatform { .. }
    ));
}

fn resolve_with<R: InstallationRoot>(root: R, path: &str) -> Option<PathBuf> {
    root.resolve(path)
}

#[test]
fn borrowed_dir_root_is_a_root() {
    let dir = install(&["lib/linux64/adaptagrams.so"]);
    let root = DirRoot::new(dir.path());
    assert_eq!(
        resolve_with(&root, "lib/linux64/adaptagrams.so"),
        root.resolve("lib/linux64/adaptagrams.so")
    );
    assert!(resolve_with(&root, "lib/osx64/adaptagrams.dylib").is_none());
}

#[test]
fn bundle_starts_on_borrowed_dir_root() {
    init_logger();
    let dir = install(&["lib/linux64/adaptagrams.so"]);
    let root = DirRoot::new(dir.path());
    let calls = Calls::default();
    let mut bundle: NativeBundle<'_, &DirRoot, RecordingLoader> = NativeBundle::new(
        Bootstrapper::new().signals(PlatformSignals::new("Linux", 64)),
        RecordingLoader::new(&calls),
    );

    bundle.start(&root).unwrap();
    assert!(bundle.is_active());
    assert_eq!(bundle.root().map(|r| r.dir()), Some(dir.path()));
    assert_eq!(common::loads(&calls).len(), 1);

    let libs = bundle.stop().unwrap();
    assert_eq!(libs.len(), 1);
    assert!(bundle.root().is_none());
}

#[test]
fn current_exe_root_is_grandparent_of_binary() {
    let exe = std::env::current_exe().unwrap();
    let root = DirRoot::from_current_exe().unwrap();
    assert_eq!(root.dir(), exe.parent().unwrap().parent().unwrap());
}

#[cfg(windows)]
#[test]
fn resolved_location_is_not_verbatim() {
    let dir = install(&["lib/win64/adaptagrams.dll"]);
    let found = DirRoot::new(dir.path())
        .resolve("lib/win64/adaptagrams.dll")
        .unwrap();
    assert!(found.is_absolute());
    assert!(!found.to_string_lossy().starts_with(r"\\?\"));
}

#[cfg(all(feature = "native", target_os = "linux", target_pointer_width = "64"))]
#[test]
fn macro_with_flags_reports_rejected_artifact() {
    use adaptagrams_loader::loader::LoadFlags;

    init_logger();
    let dir = install(&["lib/linux64/adaptagrams.so"]);
    let err = adaptagrams_loader::bootstrap!(dir.path(), flags: LoadFlags::NOW).unwrap_err();
    match &err {
        Error::LoadFailed { path, .. } => assert_eq!(path, "lib/linux64/adaptagrams.so"),
        Error::UnsupportedPlatform { .. } => {} // signals overridden from the environment
        other => panic!("unexpected error: {other}"),
    }
}
