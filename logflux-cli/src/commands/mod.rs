//! Command handlers -- one module per subcommand

pub mod config;
pub mod draft;
pub mod suggest;

use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};

use logflux_waf_feedback::FeedbackError;

use crate::error::CliError;

/// Read a UTF-8 input file, treating `-` as stdin.
///
/// With `max_bytes` set, at most `max_bytes + 1` bytes are read and longer
/// input fails with `FeedbackError::SuggestionTooLarge`.
pub(crate) async fn read_input(path: &Path, max_bytes: Option<usize>) -> Result<String, CliError> {
    let bytes = if path == Path::new("-") {
        read_capped(tokio::io::stdin(), max_bytes).await?
    } else {
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CliError::Command(format!("input file not found: {}", path.display()))
            } else {
                CliError::Io(e)
            }
        })?;
        read_capped(file, max_bytes).await?
    };

    if let Some(max) = max_bytes {
        if bytes.len() > max {
            return Err(FeedbackError::SuggestionTooLarge {
                size: bytes.len(),
                max,
            }
            .into());
        }
    }

    String::from_utf8(bytes)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

async fn read_capped<R>(reader: R, max_bytes: Option<usize>) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    match max_bytes {
        Some(max) => {
            let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            reader.take(limit).read_to_end(&mut buf).await?;
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut buf).await?;
        }
    }
    Ok(buf)
}
