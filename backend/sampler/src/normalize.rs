//! Input normalization: size ceiling and base64 encoding with progress.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use reelscope_core::{read_percent, ReelError, VideoPayload, MAX_UPLOAD_BYTES};

// Divisible by 3 so every non-final chunk base64-encodes without padding.
const READ_CHUNK_BYTES: usize = 255 * 1024;

/// Enforce the 1 GiB ceiling before any encoding work begins.
pub fn validate_size(size_bytes: u64) -> Result<(), ReelError> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ReelError::FileTooLarge { size_bytes });
    }
    Ok(())
}

/// Guess a video MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    let mime = match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "video/mp4",
    };
    mime.to_string()
}

/// Read a video file into a base64 payload, reporting read progress.
///
/// The callback receives monotonically non-decreasing percentages 0-100
/// derived from bytes read over bytes total. The size ceiling is checked
/// from file metadata before the first byte is read.
pub async fn encode_file(
    path: &Path,
    mut on_progress: impl FnMut(u8),
) -> Result<VideoPayload, ReelError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ReelError::Decode(format!("cannot stat {}: {}", path.display(), e)))?;
    let total = metadata.len();
    validate_size(total)?;

    let mut file = File::open(path)
        .await
        .map_err(|e| ReelError::Decode(format!("cannot open {}: {}", path.display(), e)))?;

    let mut encoded = String::with_capacity((total as usize / 3 + 1) * 4);
    let mut buffer = vec![0u8; READ_CHUNK_BYTES];
    let mut bytes_read: u64 = 0;

    loop {
        // Fill the chunk fully so only the final chunk needs base64 padding.
        let mut filled = 0;
        while filled < buffer.len() {
            let n = file
                .read(&mut buffer[filled..])
                .await
                .map_err(|e| ReelError::Decode(format!("read {} failed: {}", path.display(), e)))?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == 0 {
            break;
        }
        encoded.push_str(&STANDARD.encode(&buffer[..filled]));
        bytes_read += filled as u64;
        on_progress(read_percent(bytes_read, total));
        if filled < buffer.len() {
            break;
        }
    }

    debug!(bytes = bytes_read, path = %path.display(), "encoded video payload");
    Ok(VideoPayload {
        base64: encoded,
        mime_type: mime_for_path(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn size_ceiling_is_exactly_one_gib() {
        assert!(validate_size(MAX_UPLOAD_BYTES).is_ok());
        let err = validate_size(MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(
            err,
            ReelError::FileTooLarge { size_bytes } if size_bytes == MAX_UPLOAD_BYTES + 1
        ));
    }

    #[test]
    fn mime_guessing_covers_common_containers() {
        assert_eq!(mime_for_path(Path::new("a.mp4")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("b.MOV")), "video/quicktime");
        assert_eq!(mime_for_path(Path::new("c.webm")), "video/webm");
        assert_eq!(mime_for_path(Path::new("noext")), "video/mp4");
    }

    #[tokio::test]
    async fn encode_file_round_trips_and_reports_monotone_progress() {
        let mut file = tempfile::NamedTempFile::with_suffix(".mp4").unwrap();
        // Larger than one chunk so multiple progress callbacks fire.
        let payload: Vec<u8> = (0..600_000u32).map(|i| (i % 251) as u8).collect();
        file.write_all(&payload).unwrap();
        file.flush().unwrap();

        let mut reports: Vec<u8> = Vec::new();
        let encoded = encode_file(file.path(), |p| reports.push(p)).await.unwrap();

        assert_eq!(encoded.mime_type, "video/mp4");
        let decoded = STANDARD.decode(&encoded.base64).unwrap();
        assert_eq!(decoded, payload);

        assert!(!reports.is_empty());
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*reports.last().unwrap(), 100);
    }
}
