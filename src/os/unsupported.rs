use crate::{
    error::{LoadError, load_error},
    loader::LoadFlags,
};
use std::path::Path;

/// Never constructed: no library can be loaded on this target.
#[derive(Debug)]
pub enum Library {}

pub(crate) fn open(location: &Path, _flags: LoadFlags) -> Result<Library, LoadError> {
    #[cfg(feature = "log")]
    log::trace!("no dynamic loader for {}", location.display());
    #[cfg(not(feature = "log"))]
    let _ = location;
    Err(load_error("dynamic loading is not supported on this target"))
}
