//! Operating system family classification.
//!
//! Two vocabularies meet here: the host's `os.name` (e.g. `Windows 10`,
//! `Mac OS X`) and the OS spelling the upstream download site uses in its
//! catalog (`win32`, `Darwin64`, `HP-UX`, ...). Both reduce to [`OsFamily`].

use std::fmt;

/// Canonical operating system families a tool archive can be published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Linux,
    Windows,
    Macos,
    SunOs,
    FreeBsd,
    Irix,
    Aix,
    Hpux,
}

impl OsFamily {
    pub const ALL: [OsFamily; 8] = [
        OsFamily::Linux,
        OsFamily::Windows,
        OsFamily::Macos,
        OsFamily::SunOs,
        OsFamily::FreeBsd,
        OsFamily::Irix,
        OsFamily::Aix,
        OsFamily::Hpux,
    ];

    /// Classify a raw host OS name, as reported by a JVM's `os.name`.
    ///
    /// Matching is case-sensitive. Unrecognized names yield `None`; callers
    /// must not substitute a default family.
    pub fn classify(os_name: &str) -> Option<Self> {
        if os_name == "Linux" {
            Some(Self::Linux)
        } else if os_name.starts_with("Windows") {
            Some(Self::Windows)
        } else if os_name.contains("OS X") {
            Some(Self::Macos)
        } else {
            match os_name {
                "SunOS" => Some(Self::SunOs),
                "AIX" => Some(Self::Aix),
                "HPUX" => Some(Self::Hpux),
                "Irix" => Some(Self::Irix),
                "FreeBSD" => Some(Self::FreeBsd),
                _ => None,
            }
        }
    }

    /// Classify the `os` field of a published catalog variant.
    pub fn from_publisher(os: &str) -> Option<Self> {
        match os {
            "Linux" | "linux" => Some(Self::Linux),
            "win32" | "win64" | "windows" => Some(Self::Windows),
            "Darwin" | "Darwin64" | "macos" => Some(Self::Macos),
            "SunOS" => Some(Self::SunOs),
            "FreeBSD" => Some(Self::FreeBsd),
            "IRIX" | "IRIX64" => Some(Self::Irix),
            "AIX" => Some(Self::Aix),
            "HP-UX" => Some(Self::Hpux),
            _ => None,
        }
    }

    /// Host-side name that [`OsFamily::classify`] maps back to `self`.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Macos => "Mac OS X",
            Self::SunOs => "SunOS",
            Self::FreeBsd => "FreeBSD",
            Self::Irix => "Irix",
            Self::Aix => "AIX",
            Self::Hpux => "HPUX",
        }
    }

    /// Primary spelling of this family on the upstream download site.
    pub fn publisher_name(self) -> &'static str {
        match self {
            Self::Windows => "win32",
            Self::Macos => "Darwin",
            Self::Irix => "IRIX64",
            Self::Hpux => "HP-UX",
            other => other.canonical_name(),
        }
    }

    /// File name of `tool` as shipped for this family.
    pub fn executable_name(self, tool: &str) -> String {
        match self {
            Self::Windows => format!("{tool}.exe"),
            _ => tool.to_string(),
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}
