//! Where a transcript comes from

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Input for a single processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource {
    /// Uploaded file, decoded as UTF-8
    File(PathBuf),
    /// Pasted text
    Text(String),
    /// Standard input
    Stdin,
}

impl TranscriptSource {
    /// Pick a source from CLI arguments; `-` means stdin.
    pub fn from_args(path: Option<PathBuf>, text: Option<String>) -> Result<Self> {
        match (path, text) {
            (Some(_), Some(_)) => anyhow::bail!("Pass either a transcript file or --text, not both"),
            (None, Some(text)) => Ok(Self::Text(text)),
            (Some(path), None) if path == Path::new("-") => Ok(Self::Stdin),
            (Some(path), None) => Ok(Self::File(path)),
            (None, None) => anyhow::bail!("No transcript given. Pass a file, '-' for stdin, or --text"),
        }
    }

    /// Read the transcript, rejecting input that is empty or not UTF-8.
    pub fn read(&self) -> Result<String> {
        let transcript = match self {
            Self::File(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
                decode_utf8(bytes)
                    .with_context(|| format!("Transcript is not valid UTF-8: {}", path.display()))?
            }
            Self::Text(text) => text.clone(),
            Self::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut bytes)
                    .context("Failed to read transcript from stdin")?;
                decode_utf8(bytes).context("Transcript on stdin is not valid UTF-8")?
            }
        };

        if transcript.trim().is_empty() {
            anyhow::bail!("Transcript is empty");
        }

        Ok(transcript)
    }
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String> {
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_means_stdin() {
        let source = TranscriptSource::from_args(Some(PathBuf::from("-")), None).unwrap();
        assert_eq!(source, TranscriptSource::Stdin);
    }

    #[test]
    fn file_and_text_are_mutually_exclusive() {
        let err = TranscriptSource::from_args(Some(PathBuf::from("a.txt")), Some("x".into()))
            .unwrap_err()
            .to_string();
        assert!(err.contains("not both"));
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(TranscriptSource::from_args(None, None).is_err());
    }

    #[test]
    fn reads_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meeting.txt");
        std::fs::write(&path, "Zoë: let's ship it").unwrap();

        let text = TranscriptSource::File(path).read().unwrap();
        assert_eq!(text, "Zoë: let's ship it");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meeting.doc");
        std::fs::write(&path, [0xd0, 0xcf, 0x11, 0xe0, 0xff]).unwrap();

        let err = format!("{:#}", TranscriptSource::File(path).read().unwrap_err());
        assert!(err.contains("not valid UTF-8"), "got: {}", err);
    }

    #[test]
    fn rejects_blank_text() {
        let err = TranscriptSource::Text("  \n\t".into())
            .read()
            .unwrap_err()
            .to_string();
        assert_eq!(err, "Transcript is empty");
    }
}
