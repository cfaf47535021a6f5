//! Offline transcript replay: each non-empty line of a script file is fed
//! through the capture session as a finalized recognition result.

use std::path::Path;

use anyhow::Context;

pub fn load_script(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read replay script {}", path.display()))?;

    let lines: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        anyhow::bail!("replay script {} contains no utterances", path.display());
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn skips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# demo script").unwrap();
        writeln!(file, "add 2 dove 200 g").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  upi  ").unwrap();

        let lines = load_script(file.path()).unwrap();
        assert_eq!(lines, vec!["add 2 dove 200 g", "upi"]);
    }

    #[test]
    fn empty_script_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_script(file.path()).is_err());
    }
}
