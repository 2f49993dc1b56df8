use crate::{
    Result,
    error::{Error, artifact_not_found_error, load_failed_error, unsupported_platform_error},
    loader::{LoadedLibraries, LoadedLibrary, NativeLoader},
    manifest::{ADAPTAGRAMS, Manifest},
    platform::{PlatformId, PlatformSignals},
    root::InstallationRoot,
};

/// Loads the artifacts a manifest lists for the detected platform.
///
/// # Examples
#[cfg_attr(feature = "native", doc = "```no_run")]
#[cfg_attr(not(feature = "native"), doc = "```ignore")]
/// use adaptagrams_loader::{Bootstrapper, loader::DylibLoader, root::DirRoot};
///
/// let root = DirRoot::new("/opt/kieler");
/// let libraries = Bootstrapper::new()
///     .load(&root, &mut DylibLoader::new())
///     .unwrap();
/// // Keep `libraries` alive while the native library is in use.
/// # drop(libraries);
/// ```
#[derive(Clone, Debug)]
pub struct Bootstrapper<'m> {
    manifest: &'m Manifest,
    signals: PlatformSignals,
}

impl Bootstrapper<'static> {
    /// The adaptagrams manifest with the signals of [`PlatformSignals::from_env`].
    pub fn new() -> Self {
        Self::with_manifest(&ADAPTAGRAMS)
    }
}

impl Default for Bootstrapper<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'m> Bootstrapper<'m> {
    pub fn with_manifest(manifest: &'m Manifest) -> Self {
        Self {
            manifest,
            signals: PlatformSignals::from_env(),
        }
    }

    /// Replaces the platform signals that decide which artifacts are loaded.
    pub fn signals(mut self, signals: PlatformSignals) -> Self {
        self.signals = signals;
        self
    }

    #[inline]
    pub fn manifest(&self) -> &'m Manifest {
        self.manifest
    }

    /// The platform the current signals classify as.
    #[inline]
    pub fn platform(&self) -> PlatformId {
        self.signals.detect()
    }

    /// Resolves every artifact of the detected platform against `root` and
    /// loads it with `loader`, in manifest order.
    ///
    /// Stops at the first artifact that cannot be located or loaded; nothing
    /// after it is resolved or loaded, and the handles already acquired are
    /// released. Calling this again repeats the whole sequence.
    pub fn load<R, L>(&self, root: &R, mut loader: L) -> Result<LoadedLibraries<L::Library>>
    where
        R: InstallationRoot + ?Sized,
        L: NativeLoader,
    {
        let platform = self.platform();
        if !platform.is_supported() {
            #[cfg(feature = "log")]
            log::debug!(
                "No native artifacts for os [{}] with {}-bit pointers",
                self.signals.os(),
                self.signals.pointer_width()
            );
            return Err(unsupported_platform_error(
                self.signals.os().to_owned(),
                self.signals.pointer_width(),
            ));
        }

        let artifacts = self
            .manifest
            .artifacts(platform)
            .ok_or(Error::IncompleteManifest { platform })?;
        #[cfg(feature = "log")]
        log::debug!(
            "Loading {} native artifact(s) for [{}]",
            artifacts.len(),
            platform
        );

        let mut libraries = LoadedLibraries::with_capacity(platform, artifacts.len());
        for artifact in artifacts {
            let path = artifact.install_path();
            let Some(location) = root.resolve(&path) else {
                #[cfg(feature = "log")]
                log::debug!("[{}] is missing from the installation", path);
                return Err(artifact_not_found_error(path));
            };
            #[cfg(feature = "log")]
            log::trace!("Resolved [{}] to {}", path, location.display());

            let handle = match loader.load(&location) {
                Ok(handle) => handle,
                Err(cause) => {
                    #[cfg(feature = "log")]
                    log::debug!("Loading [{}] failed: {}", path, cause);
                    return Err(load_failed_error(path, location, cause));
                }
            };
            #[cfg(feature = "log")]
            log::debug!("Loaded [{}]", path);
            libraries.push(LoadedLibrary::new(artifact, location, handle));
        }
        Ok(libraries)
    }
}

/// Loads the adaptagrams libraries for the current process from `root`.
///
/// Uses the signals of [`PlatformSignals::from_env`] and the system dynamic
/// loader with its default flags.
#[cfg(feature = "native")]
pub fn bootstrap<R>(root: &R) -> Result<LoadedLibraries<crate::loader::DylibHandle>>
where
    R: InstallationRoot + ?Sized,
{
    Bootstrapper::new().load(root, crate::loader::DylibLoader::new())
}
