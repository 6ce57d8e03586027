//! Release asset registry and download URL construction.

/// Template data for a GitHub release asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Repository owner.
    pub owner: &'static str,
    /// Repository name, also substituted for `{{NAME}}`.
    pub repo_name: &'static str,
    /// Release tag, substituted for `{{TAG}}`.
    pub tag: &'static str,
    /// OS/arch qualifier, substituted for `{{OS}}`.
    pub os_arch: &'static str,
    /// Asset filename template.
    pub filename_template: &'static str,
}

impl AssetDescriptor {
    /// Asset filename with each placeholder replaced once (name, tag, OS).
    #[must_use]
    pub fn filename(&self) -> String {
        self.filename_template
            .replacen("{{NAME}}", self.repo_name, 1)
            .replacen("{{TAG}}", self.tag, 1)
            .replacen("{{OS}}", self.os_arch, 1)
    }

    /// Download URL. Fields are used verbatim, without URL encoding.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "https://github.com/{}/{}/releases/download/{}/{}",
            self.owner,
            self.repo_name,
            self.tag,
            self.filename()
        )
    }
}

/// Release assets, keyed by uppercased language name.
pub static ASSETS: &[(&str, AssetDescriptor)] = &[(
    "LUA",
    AssetDescriptor {
        owner: "sumneko",
        repo_name: "lua-language-server",
        tag: "3.6.4",
        os_arch: "linux-x64",
        filename_template: "{{NAME}}-{{TAG}}-{{OS}}.tar.gz",
    },
)];

/// Look up the asset for `language`, ignoring case.
#[must_use]
pub fn lookup_asset(language: &str) -> Option<&'static AssetDescriptor> {
    let key = language.to_uppercase();
    ASSETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, asset)| asset)
}

/// Download URL for `language`, or `None` when it has no release asset.
#[must_use]
pub fn release_url(language: &str) -> Option<String> {
    lookup_asset(language).map(AssetDescriptor::url)
}
