use crate::{error::LoadError, loader::LoadFlags};
use std::path::Path;
use windows_sys::Win32::System::LibraryLoader::{LOAD_LIBRARY_FLAGS, LOAD_WITH_ALTERED_SEARCH_PATH};

pub type Library = libloading::Library;

fn mode(flags: LoadFlags) -> LOAD_LIBRARY_FLAGS {
    let mut mode = 0;
    if flags.contains(LoadFlags::ALTERED_SEARCH_PATH) {
        mode |= LOAD_WITH_ALTERED_SEARCH_PATH;
    }
    mode
}

pub(crate) fn open(location: &Path, flags: LoadFlags) -> Result<Library, LoadError> {
    #[cfg(feature = "log")]
    log::trace!("LoadLibraryExW({}, {:?})", location.display(), flags);
    // SAFETY: the artifact comes from the installation the host vouches for;
    // running DllMain is the point of loading it.
    let library = unsafe { libloading::os::windows::Library::load_with_flags(location, mode(flags)) }?;
    Ok(library.into())
}
