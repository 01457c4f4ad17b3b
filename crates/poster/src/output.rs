use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

// Anything outside the filesystem-safe set becomes an underscore.
static RE_UNSAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());

/// Filesystem-safe name for an item title.
///
/// Distinct titles can map to the same name; later writes win.
pub fn sanitize_filename(title: &str) -> String {
    RE_UNSAFE.replace_all(title, "_").into_owned()
}

/// Recreate the output directory, discarding anything from a prior run.
pub fn prepare_output_dir(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)
}
