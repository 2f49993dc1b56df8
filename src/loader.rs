use crate::{error::LoadError, manifest::Artifact, platform::PlatformId};
use bitflags::bitflags;
use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// How the system loader should bring an artifact into the process.
    ///
    /// Flags that do not apply to the current target are ignored.
    pub struct LoadFlags: u32 {
        /// Resolve every undefined symbol while loading instead of on first use.
        /// Unix only.
        const NOW = 1;

        /// Make the artifact's symbols available to artifacts loaded after it.
        /// Unix only.
        const GLOBAL = 2;

        /// Search the artifact's own directory for the DLLs it imports.
        /// Windows only.
        const ALTERED_SEARCH_PATH = 4;
    }
}

impl LoadFlags {
    /// The flags that let later artifacts of a manifest see the symbols of
    /// earlier ones on the current target.
    pub const fn platform_default() -> Self {
        if cfg!(windows) {
            LoadFlags::ALTERED_SEARCH_PATH
        } else {
            LoadFlags::NOW.union(LoadFlags::GLOBAL)
        }
    }
}

impl Default for LoadFlags {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// A capability that loads a shared library into the current process.
///
/// Loading runs initialisation code of the library, so implementations must
/// only be handed files from a trusted installation.
///
/// # Examples
/// ```rust
/// use adaptagrams_loader::{error::LoadError, loader::NativeLoader};
/// use std::path::{Path, PathBuf};
///
/// /// Records what would have been loaded.
/// #[derive(Default)]
/// struct DryRun(Vec<PathBuf>);
///
/// impl NativeLoader for DryRun {
///     type Library = ();
///
///     fn load(&mut self, location: &Path) -> Result<(), LoadError> {
///         self.0.push(location.to_path_buf());
///         Ok(())
///     }
/// }
/// ```
pub trait NativeLoader {
    /// The handle keeping a loaded library resident.
    type Library;

    /// Loads the library at `location`, an absolute path.
    fn load(&mut self, location: &Path) -> Result<Self::Library, LoadError>;
}

impl<L: NativeLoader + ?Sized> NativeLoader for &mut L {
    type Library = L::Library;

    fn load(&mut self, location: &Path) -> Result<Self::Library, LoadError> {
        (**self).load(location)
    }
}

/// The handle [`DylibLoader`] hands out: a `libloading::Library` on unix and
/// windows, an uninhabited type on targets without a dynamic loader.
#[cfg(feature = "native")]
pub use crate::os::Library as DylibHandle;

/// The system dynamic loader (`dlopen` / `LoadLibraryExW`).
///
/// On targets that are neither unix nor windows every load fails.
#[cfg(feature = "native")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DylibLoader {
    flags: LoadFlags,
}

#[cfg(feature = "native")]
impl DylibLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_flags(flags: LoadFlags) -> Self {
        Self { flags }
    }

    #[inline]
    pub fn flags(&self) -> LoadFlags {
        self.flags
    }
}

#[cfg(feature = "native")]
impl NativeLoader for DylibLoader {
    type Library = DylibHandle;

    fn load(&mut self, location: &Path) -> Result<Self::Library, LoadError> {
        crate::os::open(location, self.flags)
    }
}

/// One artifact that is resident in the process.
pub struct LoadedLibrary<H> {
    artifact: Artifact,
    location: PathBuf,
    handle: H,
}

impl<H> LoadedLibrary<H> {
    pub(crate) fn new(artifact: Artifact, location: PathBuf, handle: H) -> Self {
        Self {
            artifact,
            location,
            handle,
        }
    }

    #[inline]
    pub fn artifact(&self) -> Artifact {
        self.artifact
    }

    /// Where the artifact was loaded from.
    #[inline]
    pub fn location(&self) -> &Path {
        &self.location
    }

    #[inline]
    pub fn handle(&self) -> &H {
        &self.handle
    }
}

impl<H> Debug for LoadedLibrary<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedLibrary")
            .field("artifact", &self.artifact.path())
            .field("location", &self.location)
            .finish()
    }
}

/// The artifacts of one platform, in the order they were loaded.
///
/// Dropping this releases the handles in reverse load order, so that no
/// artifact is released while one depending on it is still held. Keep it
/// alive for as long as the native library is used.
pub struct LoadedLibraries<H> {
    platform: PlatformId,
    libraries: Vec<LoadedLibrary<H>>,
}

impl<H> LoadedLibraries<H> {
    pub(crate) fn with_capacity(platform: PlatformId, capacity: usize) -> Self {
        Self {
            platform,
            libraries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, library: LoadedLibrary<H>) {
        self.libraries.push(library);
    }

    /// The platform the artifacts were selected for.
    #[inline]
    pub fn platform(&self) -> PlatformId {
        self.platform
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadedLibrary<H>> {
        self.libraries.iter()
    }

    /// Finds a loaded artifact by file name, e.g. `adaptagrams.dll`.
    pub fn get(&self, file_name: &str) -> Option<&LoadedLibrary<H>> {
        self.libraries
            .iter()
            .find(|lib| lib.artifact.file_name() == file_name)
    }

    /// Releases every handle, last loaded first.
    pub fn close(self) {}
}

impl<H> Drop for LoadedLibraries<H> {
    fn drop(&mut self) {
        while let Some(library) = self.libraries.pop() {
            #[cfg(feature = "log")]
            log::trace!("Releasing [{}]", library.artifact);
            drop(library);
        }
    }
}

impl<'a, H> IntoIterator for &'a LoadedLibraries<H> {
    type Item = &'a LoadedLibrary<H>;
    type IntoIter = std::slice::Iter<'a, LoadedLibrary<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<H> Debug for LoadedLibraries<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedLibraries")
            .field("platform", &self.platform)
            .field("libraries", &self.libraries)
            .finish()
    }
}
