//! Placeholder file picker

use futures::future::{self, BoxFuture, FutureExt};

use super::{BackendResult, FileHandle, FileKind, FilePicker};

/// Stands in until a native picker is wired up. Never returns files.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderPicker;

impl FilePicker for PlaceholderPicker {
    fn pick_files(&self, accepted: &'static [FileKind]) -> BoxFuture<'_, BackendResult<Vec<FileHandle>>> {
        let kinds: Vec<&str> = accepted.iter().map(|k| k.label()).collect();
        tracing::info!(accepted = ?kinds, "File picker not available, no files selected");
        future::ready(Ok(Vec::new())).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_returns_no_files() {
        let files = PlaceholderPicker.pick_files(&[FileKind::Audio]).await.unwrap();
        assert!(files.is_empty());
    }
}
