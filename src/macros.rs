/// Bootstrap the adaptagrams libraries from an installation directory
/// # Example
/// ```no_run
/// # use adaptagrams_loader::{bootstrap, loader::LoadFlags};
/// // with the default flags of the current target
/// let libs = bootstrap!("/opt/kieler");
/// // with explicit loader flags
/// let libs = bootstrap!("/opt/kieler", flags: LoadFlags::NOW);
/// ```
#[cfg(feature = "native")]
#[macro_export]
macro_rules! bootstrap {
    ($dir:expr) => {
        $crate::bootstrap(&$crate::root::DirRoot::new($dir))
    };
    ($dir:expr, flags: $flags:expr) => {
        $crate::Bootstrapper::new().load(
            &$crate::root::DirRoot::new($dir),
            $crate::loader::DylibLoader::with_flags($flags),
        )
    };
}
