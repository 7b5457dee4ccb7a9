use isle_bundler::DEFAULT_ASSETS_DIR;

pub fn default_assets_dir() -> String {
    DEFAULT_ASSETS_DIR.to_string()
}

pub fn default_remove_orphans() -> bool {
    true
}
