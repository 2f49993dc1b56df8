use crate::platform::PlatformId;
use std::{
    borrow::Cow,
    fmt::{Debug, Display},
    path::PathBuf,
};

/// The boxed cause produced by a [`NativeLoader`](crate::loader::NativeLoader)
/// when the operating system refuses to load a file.
pub type LoadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types used throughout the `adaptagrams_loader` library.
///
/// Every variant is terminal for a bootstrap attempt: nothing is retried and
/// nothing is downgraded to a warning.
#[derive(Debug)]
pub enum Error {
    /// The platform signals did not classify as any supported platform.
    ///
    /// No artifact was resolved or loaded.
    UnsupportedPlatform {
        /// The OS-family signal as it was observed.
        os: Cow<'static, str>,
        /// The pointer-width signal as it was observed.
        pointer_width: u32,
    },

    /// The installation root could not locate a required artifact.
    ///
    /// This typically indicates a packaging defect:
    /// * The platform directory is missing from the distribution
    /// * A runtime-support library was not shipped next to the main library
    ArtifactNotFound {
        /// The root-relative path that was requested.
        path: Cow<'static, str>,
    },

    /// The artifact exists but the operating system loader rejected it.
    ///
    /// This typically indicates:
    /// * A corrupt or truncated file
    /// * An architecture mismatch with the running process
    /// * Symbols that could not be resolved against the already loaded artifacts
    LoadFailed {
        /// The root-relative path of the artifact.
        path: Cow<'static, str>,
        /// The location the installation root resolved the artifact to.
        location: PathBuf,
        /// The error reported by the loader.
        cause: LoadError,
    },

    /// A supported platform has no entry in the manifest in use.
    ///
    /// This is an internal invariant violation; the built-in manifest covers
    /// every supported platform.
    IncompleteManifest {
        /// The platform that was looked up.
        platform: PlatformId,
    },

    /// [`NativeBundle::start`](crate::lifecycle::NativeBundle::start) was called
    /// on a bundle that is already active.
    AlreadyStarted,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedPlatform { os, pointer_width } => write!(
                f,
                "Unsupported platform: os `{os}` with {pointer_width}-bit pointers"
            ),
            Error::ArtifactNotFound { path } => {
                write!(f, "Library '{path}' could not be located")
            }
            Error::LoadFailed {
                path,
                location,
                cause,
            } => write!(
                f,
                "Library '{path}' could not be loaded from {}: {cause}",
                location.display()
            ),
            Error::IncompleteManifest { platform } => {
                write!(f, "Manifest has no artifacts for platform {platform}")
            }
            Error::AlreadyStarted => write!(f, "Native bundle is already started"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::LoadFailed { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

#[cold]
#[inline(never)]
pub(crate) fn unsupported_platform_error(
    os: impl Into<Cow<'static, str>>,
    pointer_width: u32,
) -> Error {
    Error::UnsupportedPlatform {
        os: os.into(),
        pointer_width,
    }
}

#[cold]
#[inline(never)]
pub(crate) fn artifact_not_found_error(path: impl Into<Cow<'static, str>>) -> Error {
    Error::ArtifactNotFound { path: path.into() }
}

#[cold]
#[inline(never)]
pub(crate) fn load_failed_error(
    path: impl Into<Cow<'static, str>>,
    location: PathBuf,
    cause: LoadError,
) -> Error {
    Error::LoadFailed {
        path: path.into(),
        location,
        cause,
    }
}

/// Creates a loader cause from a plain message.
///
/// Handy for [`NativeLoader`](crate::loader::NativeLoader) implementations
/// that have no richer error type to report.
#[cold]
#[inline(never)]
pub fn load_error(msg: impl Into<Cow<'static, str>>) -> LoadError {
    let msg: Cow<'static, str> = msg.into();
    msg.into_owned().into()
}
