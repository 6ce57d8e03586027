//! Server registry.
//!
//! One entry per supported language. Order is preserved, which makes it the
//! expansion order of `all`.

use super::provider::ServerDescriptor;

/// Known language servers, in table order.
pub static SERVERS: &[(&str, ServerDescriptor)] = &[
    (
        "lua",
        ServerDescriptor::release(
            "lua-language-server",
            "lua/bin/lua-language-server",
            "lua-language-server",
        ),
    ),
    ("vim", ServerDescriptor::npm("vim-language-server")),
    ("bash", ServerDescriptor::npm("bash-language-server")),
    (
        "go",
        ServerDescriptor::toolchain("golang.org/x/tools/gopls").with_bin("gopls"),
    ),
    ("python", ServerDescriptor::npm("pyright")),
    (
        "css",
        ServerDescriptor::npm("vscode-langservers-extracted").with_bin("vscode-css-language-server"),
    ),
    (
        "json",
        ServerDescriptor::npm("vscode-langservers-extracted")
            .with_bin("vscode-json-language-server"),
    ),
];

/// Look up a server by exact language key.
#[must_use]
pub fn lookup_server(language: &str) -> Option<&'static ServerDescriptor> {
    SERVERS
        .iter()
        .find(|(key, _)| *key == language)
        .map(|(_, server)| server)
}

/// Iterate over every registered server in table order.
pub fn servers() -> impl Iterator<Item = (&'static str, &'static ServerDescriptor)> {
    SERVERS.iter().map(|(key, server)| (*key, server))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{InstallMode, lookup_asset};
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known_servers() {
        let vim = lookup_server("vim").unwrap();
        assert_eq!(vim.package_name, "vim-language-server");
        assert_eq!(vim.mode, InstallMode::PackageManager);

        let go = lookup_server("go").unwrap();
        assert_eq!(go.mode, InstallMode::Toolchain);
        assert_eq!(go.executable(), "gopls");
    }

    #[test]
    fn test_lookup_unknown_server() {
        assert!(lookup_server("doesnotexist").is_none());
        assert!(lookup_server("all").is_none());
        // Server keys are exact, unlike asset keys.
        assert!(lookup_server("LUA").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = servers().map(|(key, _)| key).collect();
        assert_eq!(keys.len(), SERVERS.len());
    }

    #[test]
    fn test_release_servers_are_complete() {
        for (key, server) in servers().filter(|(_, s)| s.mode == InstallMode::ReleaseArchive) {
            assert!(server.source_path.is_some(), "{key} has no source path");
            assert!(server.link_target.is_some(), "{key} has no link target");
            assert!(lookup_asset(key).is_some(), "{key} has no release asset");
        }
    }

    #[test]
    fn test_shared_package_has_distinct_binaries() {
        let css = lookup_server("css").unwrap();
        let json = lookup_server("json").unwrap();
        assert_eq!(css.package_name, json.package_name);
        assert_ne!(css.executable(), json.executable());
    }
}
