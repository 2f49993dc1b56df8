//! Per-platform artifact manifests
//!
//! A manifest lists, for every supported platform, the artifacts that must be
//! loaded and the order to load them in. The order is the native dependency
//! chain: an artifact comes after every artifact whose symbols it needs.

use crate::platform::PlatformId;
use std::fmt::{Display, Formatter};

/// The directory below the installation root that holds the platform
/// directories.
pub const LIBRARY_DIR: &str = "lib";

/// The adaptagrams constrained-layout libraries as packaged per platform.
pub static ADAPTAGRAMS: Manifest = Manifest::new(
    LIBRARY_DIR,
    &[
        (PlatformId::Linux32, &["linux32/adaptagrams.so"]),
        (PlatformId::Linux64, &["linux64/adaptagrams.so"]),
        (
            PlatformId::Windows32,
            &[
                "win32/libgcc_s_dw2-1.dll",
                "win32/libstdc++-6.dll",
                "win32/adaptagrams.dll",
            ],
        ),
        (
            PlatformId::Windows64,
            &[
                "win64/libwinpthread-1.dll",
                "win64/libgcc_s_seh-1.dll",
                "win64/libstdc++-6.dll",
                "win64/adaptagrams.dll",
            ],
        ),
        (PlatformId::MacOs32, &["osx32/adaptagrams.dylib"]),
        (PlatformId::MacOs64, &["osx64/adaptagrams.dylib"]),
    ],
);

/// One loadable unit of a platform, relative to the library directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Artifact {
    library_dir: &'static str,
    path: &'static str,
}

impl Artifact {
    /// The path relative to the library directory, e.g. `win64/adaptagrams.dll`.
    #[inline]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// The path relative to the installation root, e.g.
    /// `lib/win64/adaptagrams.dll`.
    pub fn install_path(&self) -> String {
        if self.library_dir.is_empty() {
            self.path.to_owned()
        } else {
            format!("{}/{}", self.library_dir, self.path)
        }
    }

    /// The file name of the artifact.
    pub fn file_name(&self) -> &'static str {
        self.path.rsplit('/').next().unwrap_or(self.path)
    }
}

impl Display for Artifact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path)
    }
}

/// A static lookup table from platform to its ordered artifacts.
#[derive(Debug)]
pub struct Manifest {
    library_dir: &'static str,
    entries: &'static [(PlatformId, &'static [&'static str])],
}

impl Manifest {
    /// Declares a manifest. `entries` keeps the order given; the first entry
    /// for a platform wins if it appears more than once.
    pub const fn new(
        library_dir: &'static str,
        entries: &'static [(PlatformId, &'static [&'static str])],
    ) -> Self {
        Self {
            library_dir,
            entries,
        }
    }

    #[inline]
    pub fn library_dir(&self) -> &'static str {
        self.library_dir
    }

    /// The artifacts of `platform` in load order, or `None` when the manifest
    /// has no entry for it.
    pub fn artifacts(
        &self,
        platform: PlatformId,
    ) -> Option<impl ExactSizeIterator<Item = Artifact> + '_> {
        let (_, paths) = self.entries.iter().find(|(id, _)| *id == platform)?;
        let library_dir = self.library_dir;
        Some(paths.iter().map(move |&path| Artifact { library_dir, path }))
    }

    /// The platforms this manifest has entries for.
    pub fn platforms(&self) -> impl Iterator<Item = PlatformId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    #[inline]
    pub fn supports(&self, platform: PlatformId) -> bool {
        self.platforms().any(|id| id == platform)
    }
}
