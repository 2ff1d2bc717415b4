use cmkup_platform::compat::arch_compatible;
use cmkup_platform::{HostDescriptor, OsFamily};
use tracing::{debug, warn};

use crate::error::{Available, Error, Result};
use crate::{Catalog, Installable, Variant};

/// The archive selected for one tool version on one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub id: String,
    pub variant: Variant,
}

impl Resolution {
    pub fn url(&self) -> &str {
        &self.variant.url
    }
}

impl Variant {
    /// Whether this archive runs on a host of `family` reporting `host_arch`.
    pub fn applies_to(&self, family: OsFamily, host_arch: &str) -> bool {
        match OsFamily::from_publisher(&self.os) {
            Some(published) if published == family => {
                arch_compatible(family, &self.os, &self.arch, host_arch)
            }
            _ => false,
        }
    }
}

impl Installable {
    /// First variant, in catalog order, that runs on `host`.
    pub fn resolve(&self, host: &HostDescriptor) -> Option<&Variant> {
        let family = host.family();
        let found = self.variants.iter().find(|v| {
            let ok = v.applies_to(family, host.arch());
            if !ok {
                debug!(
                    id = %self.id,
                    os = %v.os,
                    arch = %v.arch,
                    "variant does not apply to {host}"
                );
            }
            ok
        })?;
        if !family.matrix_verified() {
            warn!(
                id = %self.id,
                os = %found.os,
                arch = %found.arch,
                "selected by an unverified {family} compatibility rule"
            );
        }
        Some(found)
    }
}

impl Catalog {
    /// Select the archive of version `id` that runs on `host`.
    ///
    /// An unknown `id` and an id without a compatible archive are reported as
    /// distinct errors.
    pub fn resolve(&self, id: &str, host: &HostDescriptor) -> Result<Resolution> {
        let inst = self.find(id).ok_or_else(|| Error::NoMatchingVersion { id: id.to_string() })?;
        match inst.resolve(host) {
            Some(variant) => {
                debug!(id, url = %variant.url, "resolved download for {host}");
                Ok(Resolution {
                    id: inst.id.clone(),
                    variant: variant.clone(),
                })
            }
            None => Err(Error::NoMatchingVariant {
                id: id.to_string(),
                host_os: host.os_name().to_string(),
                host_arch: host.arch().to_string(),
                available: Available(inst.variants.clone()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(os: &str, arch: &str) -> Variant {
        Variant {
            os: os.to_string(),
            arch: arch.to_string(),
            url: format!("https://x/cmake-{os}-{arch}"),
        }
    }

    fn catalog(variants: Vec<Variant>) -> Catalog {
        Catalog::new(vec![Installable {
            id: "3.20.0".into(),
            name: None,
            url: None,
            variants,
        }])
    }

    fn host(family: OsFamily, arch: &str) -> HostDescriptor {
        HostDescriptor::new(family, arch)
    }

    #[test]
    fn first_match_wins() {
        let cat = catalog(vec![variant("Linux", "i386"), variant("Linux", "x86_64")]);
        let res = cat.resolve("3.20.0", &host(OsFamily::Linux, "amd64")).unwrap();
        assert_eq!(res.variant.arch, "i386");
    }

    #[test]
    fn duplicates_do_not_crash() {
        let mut dup = variant("Linux", "x86_64");
        dup.url = "second".into();
        let cat = catalog(vec![variant("Linux", "x86_64"), dup]);
        let res = cat.resolve("3.20.0", &host(OsFamily::Linux, "amd64")).unwrap();
        assert_eq!(res.url(), "https://x/cmake-Linux-x86_64");
    }

    #[test]
    fn other_families_are_skipped() {
        let cat = catalog(vec![variant("Darwin", "universal"), variant("win32", "x86")]);
        let err = cat.resolve("3.20.0", &host(OsFamily::Linux, "amd64")).unwrap_err();
        assert!(matches!(err, Error::NoMatchingVariant { .. }));
    }

    #[test]
    fn unclassifiable_publisher_os_is_skipped() {
        let cat = catalog(vec![variant("Haiku", "x86_64"), variant("Linux", "x86_64")]);
        let res = cat.resolve("3.20.0", &host(OsFamily::Linux, "amd64")).unwrap();
        assert_eq!(res.variant.os, "Linux");
    }

    #[test]
    fn unknown_id() {
        let cat = catalog(vec![variant("Linux", "x86_64")]);
        let err = cat.resolve("9.9.9", &host(OsFamily::Linux, "amd64")).unwrap_err();
        assert!(matches!(err, Error::NoMatchingVersion { ref id } if id == "9.9.9"));
    }

    #[test]
    fn no_variant_lists_available_downloads() {
        let cat = catalog(vec![variant("Linux", "x86_64"), variant("win64", "x64")]);
        let err = cat.resolve("3.20.0", &host(OsFamily::Linux, "i386")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Linux (i386)"));
        assert!(msg.contains("[Linux/x86_64 https://x/cmake-Linux-x86_64]"));
        assert!(msg.contains("[win64/x64 https://x/cmake-win64-x64]"));
    }

    #[test]
    fn applies_to_requires_same_family() {
        assert!(!variant("win32", "x86").applies_to(OsFamily::Linux, "amd64"));
        assert!(variant("win32", "x86").applies_to(OsFamily::Windows, "amd64"));
    }
}
