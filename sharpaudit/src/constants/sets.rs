use std::sync::OnceLock;

/// Returns folder names excluded from scanning unless force-included.
pub fn get_default_exclude_folders() -> &'static [&'static str] {
    static FOLDERS: OnceLock<Vec<&'static str>> = OnceLock::new();
    FOLDERS.get_or_init(|| {
        vec![
            "bin",
            "obj",
            "packages",
            "TestResults",
            ".vs",
            ".git",
            "node_modules",
        ]
    })
}
