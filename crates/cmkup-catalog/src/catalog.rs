use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const JSONP_PREFIX: &str = "downloadService.post(";

/// One downloadable archive of a tool version.
///
/// `os` and `arch` are kept exactly as published; classification happens at
/// resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Variant {
    #[serde(alias = "os_cm")]
    pub os: String,
    #[serde(alias = "arch_cm")]
    pub arch: String,
    pub url: String,
}

/// A published tool version and its per-platform archives, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Installable {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub variants: Vec<Variant>,
}

/// The full list of installable versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    list: Vec<Installable>,
}

impl Catalog {
    pub fn new(list: Vec<Installable>) -> Self {
        Self { list }
    }

    /// Parse a catalog document, accepting both plain JSON and the
    /// update-center `downloadService.post('<id>', {...})` envelope.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(strip_envelope(text))?)
    }

    /// Parse a downloaded catalog body. Bytes that are not UTF-8 are rejected
    /// rather than replaced, so a corrupted URL never reaches the resolver.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_json(std::str::from_utf8(bytes)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&text)
    }

    pub fn installables(&self) -> &[Installable] {
        &self.list
    }

    /// First installable published under `id`.
    pub fn find(&self, id: &str) -> Option<&Installable> {
        self.list.iter().find(|inst| inst.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|inst| inst.id.as_str())
    }
}

fn strip_envelope(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix(JSONP_PREFIX) else {
        return trimmed;
    };
    match (rest.find('{'), rest.rfind('}')) {
        (Some(start), Some(end)) if start < end => &rest[start..=end],
        _ => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"{
        "list": [
            {
                "id": "3.20.0",
                "name": "3.20.0",
                "variants": [
                    {
                        "os": "Linux",
                        "arch": "x86_64",
                        "url": "https://x/cmake-3.20.0-linux-x86_64.tar.gz"
                    },
                    {"os": "win64", "arch": "x64", "url": "https://x/cmake-3.20.0-win64-x64.zip"}
                ]
            },
            {"id": "2.8.12", "variants": []}
        ]
    }"#;

    #[test]
    fn parses_plain_json() {
        let catalog = Catalog::from_json(PLAIN).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), ["3.20.0", "2.8.12"]);
        let inst = catalog.find("3.20.0").unwrap();
        assert_eq!(inst.name.as_deref(), Some("3.20.0"));
        assert_eq!(inst.variants.len(), 2);
        assert_eq!(inst.variants[1].os, "win64");
    }

    #[test]
    fn parses_update_center_envelope() {
        let wrapped =
            format!("downloadService.post('hudson.plugins.cmake.CmakeInstaller',{PLAIN});\n");
        let catalog = Catalog::from_json(&wrapped).unwrap();
        assert!(catalog.find("2.8.12").is_some());
    }

    #[test]
    fn accepts_legacy_field_names() {
        let json = r#"{"list": [{"id": "3.0.2", "variants": [
            {"os_cm": "Darwin", "arch_cm": "universal", "url": "u"}
        ]}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        let variant = &catalog.find("3.0.2").unwrap().variants[0];
        assert_eq!(variant.os, "Darwin");
        assert_eq!(variant.arch, "universal");
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"{"list": [{"id": "1", "variants": [
            {"os": "Linux", "arch": "i386", "url": "u", "sha": "x"}
        ]}]}"#;
        assert!(matches!(Catalog::from_json(json), Err(Error::Parse(_))));
    }

    #[test]
    fn rejects_missing_fields() {
        let json = r#"{"list":[{"id":"1","variants":[{"os":"Linux","url":"u"}]}]}"#;
        assert!(Catalog::from_json(json).is_err());
        assert!(Catalog::from_json(r#"{"list":[{"id":"1"}]}"#).is_err());
        assert!(Catalog::from_json("{}").is_err());
    }

    #[test]
    fn from_slice_rejects_invalid_utf8() {
        assert_eq!(Catalog::from_slice(PLAIN.as_bytes()).unwrap().installables().len(), 2);

        let json = r#"{"list":[{"id":"1","variants":[{"os":"Linux","arch":"x","url":"u~"}]}]}"#;
        let mut bytes = json.as_bytes().to_vec();
        bytes[json.find('~').unwrap()] = 0xFF;
        assert!(matches!(Catalog::from_slice(&bytes), Err(Error::Encoding(_))));
    }

    #[test]
    fn reads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, PLAIN).unwrap();
        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.installables().len(), 2);

        let missing = Catalog::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, Error::Read { .. }));
    }
}
