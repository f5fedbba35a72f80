//! Output utilities: patch emission and terminal messages

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Where a rendered patch goes
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget<'a> {
    Stdout,
    File(&'a Path),
}

impl<'a> OutputTarget<'a> {
    pub fn from_option(path: Option<&'a Path>) -> Self {
        match path {
            Some(path) => Self::File(path),
            None => Self::Stdout,
        }
    }
}

/// Write a fully rendered patch to its target
pub fn write_patch(rendered: &str, target: &OutputTarget<'_>) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered).context("Failed to write patch to stdout")?;
        }
        OutputTarget::File(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write patch to {}", path.display()))?;
            println!("Patch written to {}", path.display());
        }
    }
    Ok(())
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);

        let path = Path::new("/tmp/patch.json");
        assert_eq!(OutputTarget::from_option(Some(path)), OutputTarget::File(path));
    }

    #[test]
    fn test_write_patch_to_file_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.json");

        write_patch(r#"{"kind":"Deployment"}"#, &OutputTarget::File(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, r#"{"kind":"Deployment"}"#);
    }

    #[test]
    fn test_write_patch_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("patch.json");

        let err = write_patch("{}", &OutputTarget::File(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to write patch"));
    }
}
