//! Extraction of build-tool metadata comment blocks from source files.
//!
//! Provisioning tooling injects an environment parameter block into
//! generated entry points as a delimited comment. This module recovers the
//! first such block so build steps can re-emit it verbatim.

use std::fs;
use std::io;
use std::path::Path;

const COMMENT_START: &str = "/* Amplify Params - DO NOT EDIT";
const COMMENT_END: &str = "Amplify Params - DO NOT EDIT */";

/// Return the first metadata comment block in `contents`, including both
/// markers, or `None` when no complete block is present.
///
/// A file may contain several blocks; only the first is returned.
pub fn find_params_comment(contents: &str) -> Option<&str> {
    let start = contents.find(COMMENT_START)?;
    let end = contents[start..].find(COMMENT_END)?;
    Some(&contents[start..start + end + COMMENT_END.len()])
}

/// Read `path` and extract its metadata comment block.
pub fn params_comment_in_file(path: &Path) -> io::Result<Option<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(find_params_comment(&contents).map(str::to_string))
}

/// Probe `dir/index.js` then `dir/index.ts` for a metadata comment block.
///
/// Returns the first block found, or an empty string when neither entry
/// point carries one.
pub fn generate_params_comment(dir: &Path) -> String {
    for name in ["index.js", "index.ts"] {
        let path = dir.join(name);
        if path.exists() {
            if let Ok(Some(comment)) = params_comment_in_file(&path) {
                return comment;
            }
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BLOCK: &str = "/* Amplify Params - DO NOT EDIT\n\tENV\n\tREGION\nAmplify Params - DO NOT EDIT */";

    #[test]
    fn test_finds_block_with_markers() {
        let contents = format!("const x = 1;\n{BLOCK}\nexport {{}};\n");
        assert_eq!(find_params_comment(&contents), Some(BLOCK));
    }

    #[test]
    fn test_returns_first_of_multiple_blocks() {
        let second = BLOCK.replace("ENV", "OTHER");
        let contents = format!("{BLOCK}\n{second}\n");
        assert_eq!(find_params_comment(&contents), Some(BLOCK));
    }

    #[test]
    fn test_none_without_end_marker() {
        let contents = "/* Amplify Params - DO NOT EDIT\n\tENV\n";
        assert_eq!(find_params_comment(contents), None);
    }

    #[test]
    fn test_none_on_plain_source() {
        assert_eq!(find_params_comment("fn main() {}"), None);
    }

    #[test]
    fn test_generate_prefers_index_js() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.js"), format!("{BLOCK}\n")).unwrap();
        fs::write(
            dir.path().join("index.ts"),
            format!("{}\n", BLOCK.replace("ENV", "TS_ONLY")),
        )
        .unwrap();

        assert_eq!(generate_params_comment(dir.path()), BLOCK);
    }

    #[test]
    fn test_generate_falls_back_to_index_ts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.ts"), format!("{BLOCK}\n")).unwrap();

        assert_eq!(generate_params_comment(dir.path()), BLOCK);
    }

    #[test]
    fn test_generate_empty_when_no_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(generate_params_comment(dir.path()), "");
    }
}
