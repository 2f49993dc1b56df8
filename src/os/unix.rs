use crate::{error::LoadError, loader::LoadFlags};
use std::path::Path;

pub type Library = libloading::Library;

fn mode(flags: LoadFlags) -> libc::c_int {
    let binding = if flags.contains(LoadFlags::NOW) {
        libc::RTLD_NOW
    } else {
        libc::RTLD_LAZY
    };
    let scope = if flags.contains(LoadFlags::GLOBAL) {
        libc::RTLD_GLOBAL
    } else {
        libc::RTLD_LOCAL
    };
    binding | scope
}

pub(crate) fn open(location: &Path, flags: LoadFlags) -> Result<Library, LoadError> {
    #[cfg(feature = "log")]
    log::trace!("dlopen({}, {:?})", location.display(), flags);
    // SAFETY: the artifact comes from the installation the host vouches for;
    // running its initialisers is the point of loading it.
    let library = unsafe { libloading::os::unix::Library::open(Some(location), mode(flags)) }?;
    Ok(library.into())
}
