//! Platform resolution
//!
//! Maps an operating system name and CPU architecture (as reported by
//! `uname -s` / `uname -m`, or the Rust target constants) to the canonical
//! platform tag used in release archive names.

pub mod detection;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SetupError};

/// Library file extension used when the platform tag has no known OS prefix
pub const DEFAULT_LIBRARY_EXTENSION: &str = "so";

/// Every library extension a canonical artifact file may carry
pub const LIBRARY_EXTENSIONS: &[&str] = &["so", "dylib", "dll"];

/// A supported release platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Universal macOS build
    MacOs,
    LinuxX86_64,
    LinuxArm64,
    WindowsX86_64,
}

impl Platform {
    /// All platforms, in menu order
    pub const ALL: [Platform; 4] = [
        Platform::MacOs,
        Platform::LinuxX86_64,
        Platform::LinuxArm64,
        Platform::WindowsX86_64,
    ];

    /// Canonical tag as it appears in download URLs
    pub fn tag(self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::LinuxX86_64 => "linux-x86_64",
            Platform::LinuxArm64 => "linux-arm64",
            Platform::WindowsX86_64 => "windows-x86_64",
        }
    }

    /// Human readable label used in the selection menu
    pub fn label(self) -> &'static str {
        match self {
            Platform::MacOs => "macOS",
            Platform::LinuxX86_64 => "Linux x86_64",
            Platform::LinuxArm64 => "Linux ARM64",
            Platform::WindowsX86_64 => "Windows x86_64",
        }
    }

    /// Native library extension for this platform
    pub fn library_extension(self) -> &'static str {
        library_extension(self.tag())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Platform {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.tag() == tag)
            .ok_or_else(|| crate::error::platform::invalid_tag(s))
    }
}

/// Outcome of mapping an OS/architecture pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Platform),
    /// The pair is not mapped; the operator has to pick (or skip)
    NeedsOperatorChoice { os: String, arch: String },
}

/// Map an OS family and architecture to a platform
///
/// Darwin maps to the universal macOS build regardless of architecture, and any
/// Windows-like shell (MINGW, MSYS, Cygwin) maps to the x86_64 Windows build.
pub fn resolve(os_name: &str, arch_name: &str) -> Resolution {
    let os = os_name.trim();
    let arch = arch_name.trim();

    let platform = match os_family(os) {
        Some(OsFamily::Darwin) => Some(Platform::MacOs),
        Some(OsFamily::Windows) => Some(Platform::WindowsX86_64),
        Some(OsFamily::Linux) => match arch {
            "x86_64" => Some(Platform::LinuxX86_64),
            "aarch64" | "arm64" => Some(Platform::LinuxArm64),
            _ => None,
        },
        None => None,
    };

    match platform {
        Some(p) => Resolution::Resolved(p),
        None => Resolution::NeedsOperatorChoice {
            os: os.to_string(),
            arch: arch.to_string(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OsFamily {
    Darwin,
    Linux,
    Windows,
}

fn os_family(os: &str) -> Option<OsFamily> {
    let upper = os.to_uppercase();
    if upper == "DARWIN" {
        Some(OsFamily::Darwin)
    } else if upper == "LINUX" {
        Some(OsFamily::Linux)
    } else if upper.starts_with("MINGW")
        || upper.starts_with("MSYS")
        || upper.starts_with("CYGWIN")
        || upper == "WINDOWS_NT"
        || upper == "WINDOWS"
    {
        Some(OsFamily::Windows)
    } else {
        None
    }
}

/// Library extension for a platform tag, decided by its OS segment only
pub fn library_extension(tag: &str) -> &'static str {
    match tag.split('-').next().unwrap_or_default() {
        "macos" => "dylib",
        "windows" => "dll",
        _ => DEFAULT_LIBRARY_EXTENSION,
    }
}

/// One entry of the platform selection menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformChoice {
    Platform(Platform),
    /// Skip extension installation; the rest of setup continues
    Skip,
}

impl PlatformChoice {
    /// Menu entries in display order, `Skip` last
    pub fn menu() -> Vec<PlatformChoice> {
        Platform::ALL
            .into_iter()
            .map(PlatformChoice::Platform)
            .chain(std::iter::once(PlatformChoice::Skip))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            PlatformChoice::Platform(p) => p.label(),
            PlatformChoice::Skip => "Skip extension installation",
        }
    }
}
