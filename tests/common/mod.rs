//! Shared helpers for integration tests.

#![allow(dead_code)]

use camino::Utf8PathBuf;
use mockall::mock;
use std::fs;
use tempfile::TempDir;
use vs_support::host::{ExtensionApi, Notification};

mock! {
    pub Api {}

    impl ExtensionApi for Api {
        fn send_notification(&self, notification: Notification);
        fn discovered_game_path(&self, game_id: &str) -> Option<Utf8PathBuf>;
        fn install_path_for_game(&self, game_id: &str) -> Option<Utf8PathBuf>;
        fn mod_installation_path(&self, game_id: &str, mod_id: &str) -> Option<String>;
    }
}

/// Empty scratch directory as a UTF-8 path.
pub fn temp_root() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, root)
}

/// Write `contents` to `root/relative`, creating parent folders.
pub fn write_file(root: &Utf8PathBuf, relative: &str, contents: &str) -> Utf8PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

pub fn files(list: &[&str]) -> Vec<String> {
    list.iter().map(|f| f.to_string()).collect()
}

/// Entry file shaped like the VS Mod Loader template.
pub const ENTRY_FILE: &str = r#"const fs = require("fs");
const path = require("path");

class MyMod {
    getMods() {
        return fs.readdirSync(path.join(__dirname, "mods/"), { withFileTypes: true }).filter((d) => d.isDirectory());
    }

    init() {
        this.getMods().forEach((m) => console.log(m.name));
    }
}

module.exports = MyMod;
"#;
