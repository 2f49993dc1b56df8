//! Installation roots
use std::path::{Path, PathBuf};

/// A host-provided capability that locates packaged files.
///
/// `path` is relative to the installation root and always uses `/` as the
/// separator, e.g. `lib/linux64/adaptagrams.so`.
///
/// # Examples
/// ```rust
/// use adaptagrams_loader::root::InstallationRoot;
/// use std::path::PathBuf;
///
/// let root = |path: &str| -> Option<PathBuf> { Some(PathBuf::from("/opt/app").join(path)) };
/// assert!(root.resolve("lib/linux64/adaptagrams.so").is_some());
/// ```
pub trait InstallationRoot {
    /// Returns an absolute location that can be handed to the loader, or
    /// `None` when the installation does not contain `path`.
    fn resolve(&self, path: &str) -> Option<PathBuf>;
}

impl<F> InstallationRoot for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        (self)(path)
    }
}

/// An installation unpacked into a directory on disk.
#[derive(Clone, Debug)]
pub struct DirRoot {
    dir: PathBuf,
}

impl DirRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The root of the installation the running executable belongs to: the
    /// parent of the directory holding it.
    pub fn from_current_exe() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let root = exe
            .parent()
            .and_then(Path::parent)
            .ok_or_else(|| std::io::Error::other("executable has no installation directory"))?;
        Ok(Self::new(root))
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl InstallationRoot for DirRoot {
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut location = self.dir.clone();
        location.extend(path.split('/').filter(|part| !part.is_empty()));
        if !location.is_file() {
            return None;
        }
        Some(absolute(location))
    }
}

impl InstallationRoot for &DirRoot {
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        (**self).resolve(path)
    }
}

// Verbatim `\\?\` paths from `canonicalize` keep `LoadLibraryExW` from
// searching the artifact's directory for its imports.
#[cfg(windows)]
fn absolute(location: PathBuf) -> PathBuf {
    std::path::absolute(&location).unwrap_or(location)
}

#[cfg(not(windows))]
fn absolute(location: PathBuf) -> PathBuf {
    location.canonicalize().unwrap_or(location)
}
