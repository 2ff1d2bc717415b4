//! Architecture naming.
//!
//! Catalog matching works on the raw `os.arch` strings a JVM would report, so
//! the running process' architecture is translated into that vocabulary
//! rather than into a closed enum.

use crate::OsFamily;

/// JVM-style `os.arch` for a Rust `target_arch` on a host of `family`.
///
/// Returns `None` for architectures cmkup has no naming rule for.
pub fn jvm_arch_name(target_arch: &str, family: OsFamily) -> Option<&'static str> {
    match (target_arch, family) {
        ("x86_64", OsFamily::Macos) => Some("x86_64"),
        ("x86_64", _) => Some("amd64"),
        ("x86", OsFamily::Windows) => Some("x86"),
        ("x86", _) => Some("i386"),
        ("aarch64", _) => Some("aarch64"),
        ("arm", _) => Some("arm"),
        ("sparc64", _) => Some("sparcv9"),
        ("sparc", _) => Some("sparc"),
        ("powerpc64", _) => Some("ppc64"),
        ("powerpc", _) => Some("ppc"),
        ("mips", _) => Some("mips"),
        _ => None,
    }
}

/// JVM-style `os.arch` of the running process.
pub fn detect(family: OsFamily) -> Option<&'static str> {
    jvm_arch_name(std::env::consts::ARCH, family)
}
