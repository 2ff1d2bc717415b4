//! Compatibility between a host architecture and a published archive.
//!
//! Only Linux and Windows rules have been checked against real hosts. The
//! remaining families keep the historical rules and are reported through
//! [`OsFamily::matrix_verified`] so callers can surface that.

use crate::OsFamily;

impl OsFamily {
    /// Whether this family's compatibility rules have been verified.
    pub fn matrix_verified(self) -> bool {
        matches!(self, OsFamily::Linux | OsFamily::Windows)
    }
}

/// Decide whether a variant published as `(variant_os, variant_arch)` runs on
/// a host of `family` reporting `host_arch`.
///
/// `variant_os` must already classify to `family`; this only applies the
/// architecture rule. 32-bit x86 archives run on 64-bit x86 hosts, never the
/// other way round.
pub fn arch_compatible(
    family: OsFamily,
    variant_os: &str,
    variant_arch: &str,
    host_arch: &str,
) -> bool {
    match family {
        OsFamily::Linux => match variant_arch {
            "i386" => matches!(host_arch, "i386" | "amd64"),
            "x86_64" | "amd64" => host_arch == "amd64",
            "aarch64" => host_arch == "aarch64",
            _ => false,
        },
        OsFamily::Macos => match variant_arch {
            "universal" => true,
            "x86_64" => matches!(host_arch, "amd64" | "x86_64"),
            "i386" => host_arch == "i386",
            _ => false,
        },
        OsFamily::Windows => match variant_os {
            "win32" => matches!(host_arch, "x86" | "amd64"),
            "win64" => host_arch == "amd64",
            _ => match variant_arch {
                "i386" | "x86" => matches!(host_arch, "x86" | "i386" | "amd64"),
                "x86_64" | "x64" | "amd64" => host_arch == "amd64",
                "arm64" | "aarch64" => host_arch == "aarch64",
                _ => false,
            },
        },
        // one build per family is published
        OsFamily::Aix | OsFamily::Hpux | OsFamily::Irix => true,
        OsFamily::SunOs | OsFamily::FreeBsd => variant_arch == host_arch,
    }
}
