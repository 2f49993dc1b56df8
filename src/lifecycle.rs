//! Start/stop holder for hosts with an activation lifecycle
use crate::{
    Result,
    bootstrap::Bootstrapper,
    error::Error,
    loader::{LoadedLibraries, NativeLoader},
    root::InstallationRoot,
};

/// Ties a bootstrap to a host's start and stop notifications.
///
/// `start` loads the native artifacts and keeps the installation root for as
/// long as the bundle is active. `stop` gives the root reference back up and
/// hands the loaded libraries to the caller, who decides how long they stay
/// resident.
pub struct NativeBundle<'m, R, L: NativeLoader> {
    bootstrapper: Bootstrapper<'m>,
    loader: L,
    root: Option<R>,
    libraries: Option<LoadedLibraries<L::Library>>,
}

impl<'m, R, L> NativeBundle<'m, R, L>
where
    R: InstallationRoot,
    L: NativeLoader,
{
    pub fn new(bootstrapper: Bootstrapper<'m>, loader: L) -> Self {
        Self {
            bootstrapper,
            loader,
            root: None,
            libraries: None,
        }
    }

    /// Bootstraps from `root` and keeps it.
    ///
    /// Fails with [`Error::AlreadyStarted`] without touching anything when the
    /// bundle is already active. On a bootstrap failure the bundle stays
    /// inactive.
    pub fn start(&mut self, root: R) -> Result<()> {
        if self.root.is_some() {
            return Err(Error::AlreadyStarted);
        }
        let libraries = self.bootstrapper.load(&root, &mut self.loader)?;
        #[cfg(feature = "log")]
        log::debug!("Native bundle started on [{}]", libraries.platform());
        self.root = Some(root);
        self.libraries = Some(libraries);
        Ok(())
    }

    /// Releases the root and returns the libraries loaded by `start`.
    pub fn stop(&mut self) -> Option<LoadedLibraries<L::Library>> {
        #[cfg(feature = "log")]
        if self.root.is_some() {
            log::debug!("Native bundle stopped");
        }
        self.root = None;
        self.libraries.take()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.root.is_some()
    }

    #[inline]
    pub fn root(&self) -> Option<&R> {
        self.root.as_ref()
    }

    #[inline]
    pub fn libraries(&self) -> Option<&LoadedLibraries<L::Library>> {
        self.libraries.as_ref()
    }

    #[inline]
    pub fn loader(&self) -> &L {
        &self.loader
    }
}
