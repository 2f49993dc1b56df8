//! Host platform detection
//!
//! A platform is the pair of an operating-system family and a pointer width.
//! Both signals are opaque strings/integers coming from the environment; this
//! module reduces them to one of the six [`PlatformId`]s the packaged native
//! libraries are built for, or to [`PlatformId::Unsupported`].

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
};

/// Overrides the OS-family signal when set.
pub const OS_NAME_VAR: &str = "ADAPTAGRAMS_OS_NAME";
/// Overrides the pointer-width signal when set.
pub const POINTER_WIDTH_VAR: &str = "ADAPTAGRAMS_POINTER_WIDTH";

/// The platforms native artifacts are packaged for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformId {
    Linux32,
    Linux64,
    Windows32,
    Windows64,
    MacOs32,
    MacOs64,
    Unsupported,
}

impl PlatformId {
    /// Every supported platform, in manifest order.
    pub const ALL: [PlatformId; 6] = [
        PlatformId::Linux32,
        PlatformId::Linux64,
        PlatformId::Windows32,
        PlatformId::Windows64,
        PlatformId::MacOs32,
        PlatformId::MacOs64,
    ];

    /// Detects the platform the current process runs on.
    #[inline]
    pub fn current() -> PlatformId {
        PlatformSignals::host().detect()
    }

    #[inline]
    pub fn is_supported(self) -> bool {
        self != PlatformId::Unsupported
    }

    /// The directory holding this platform's artifacts in a packaged
    /// distribution, e.g. `win64`.
    pub fn dir_name(self) -> Option<&'static str> {
        Some(match self {
            PlatformId::Linux32 => "linux32",
            PlatformId::Linux64 => "linux64",
            PlatformId::Windows32 => "win32",
            PlatformId::Windows64 => "win64",
            PlatformId::MacOs32 => "osx32",
            PlatformId::MacOs64 => "osx64",
            PlatformId::Unsupported => return None,
        })
    }

    pub fn pointer_width(self) -> Option<u32> {
        match self {
            PlatformId::Linux32 | PlatformId::Windows32 | PlatformId::MacOs32 => Some(32),
            PlatformId::Linux64 | PlatformId::Windows64 | PlatformId::MacOs64 => Some(64),
            PlatformId::Unsupported => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformId::Linux32 => "linux-32",
            PlatformId::Linux64 => "linux-64",
            PlatformId::Windows32 => "windows-32",
            PlatformId::Windows64 => "windows-64",
            PlatformId::MacOs32 => "macos-32",
            PlatformId::MacOs64 => "macos-64",
            PlatformId::Unsupported => "unsupported",
        }
    }
}

impl Display for PlatformId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Linux,
    Windows,
    MacOs,
}

impl Family {
    // First match wins. "darwin" contains "win" and therefore classifies as
    // Windows; `std::env::consts::OS` never reports it, only overrides can.
    fn classify(os: &str) -> Option<Family> {
        let os = os.to_lowercase();
        if os.contains("linux") {
            Some(Family::Linux)
        } else if os.contains("win") {
            Some(Family::Windows)
        } else if os.contains("mac") {
            Some(Family::MacOs)
        } else {
            None
        }
    }
}

/// Maps an OS-family signal and a pointer width to a platform.
///
/// The OS family is matched case-insensitively by substring, trying `linux`,
/// `win` and `mac` in that order. Only widths of 32 and 64 are recognised.
/// This never fails: anything unrecognised is [`PlatformId::Unsupported`].
pub fn detect(os: &str, pointer_width: u32) -> PlatformId {
    match (Family::classify(os), pointer_width) {
        (Some(Family::Linux), 32) => PlatformId::Linux32,
        (Some(Family::Linux), 64) => PlatformId::Linux64,
        (Some(Family::Windows), 32) => PlatformId::Windows32,
        (Some(Family::Windows), 64) => PlatformId::Windows64,
        (Some(Family::MacOs), 32) => PlatformId::MacOs32,
        (Some(Family::MacOs), 64) => PlatformId::MacOs64,
        _ => PlatformId::Unsupported,
    }
}

/// The raw environment signals a [`PlatformId`] is derived from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformSignals {
    os: Cow<'static, str>,
    pointer_width: u32,
}

impl PlatformSignals {
    pub fn new(os: impl Into<Cow<'static, str>>, pointer_width: u32) -> Self {
        Self {
            os: os.into(),
            pointer_width,
        }
    }

    /// The signals of the running process as compiled.
    pub fn host() -> Self {
        Self::new(std::env::consts::OS, usize::BITS)
    }

    /// The host signals with [`OS_NAME_VAR`] and [`POINTER_WIDTH_VAR`] applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The host signals with overrides taken from `lookup`.
    ///
    /// A width override that is not an integer yields width 0, which is never
    /// a supported platform.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut signals = Self::host();
        if let Some(os) = lookup(OS_NAME_VAR) {
            signals.os = os.into();
        }
        if let Some(width) = lookup(POINTER_WIDTH_VAR) {
            signals.pointer_width = width.trim().parse().unwrap_or(0);
        }
        signals
    }

    #[inline]
    pub fn os(&self) -> &str {
        &self.os
    }

    #[inline]
    pub fn pointer_width(&self) -> u32 {
        self.pointer_width
    }

    #[inline]
    pub fn detect(&self) -> PlatformId {
        detect(&self.os, self.pointer_width)
    }
}

impl Default for PlatformSignals {
    fn default() -> Self {
        Self::host()
    }
}
