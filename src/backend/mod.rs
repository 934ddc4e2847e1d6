//! External collaborators: media storage and file picking
//!
//! The hub never owns media. Listing, deletion and archiving go through
//! [`MediaBackend`]; uploads start from a [`FilePicker`]. Both return boxed
//! futures so they can sit behind `Arc<dyn ...>` and be swapped for fakes.
//!
//! - `memory`: in-process backend seeded from a JSON catalog
//! - `picker`: placeholder picker (upload is not wired yet)

mod memory;
mod picker;

use std::fmt;

use futures::future::BoxFuture;

use crate::error::BackendError;
use crate::model::{ItemId, LibraryKind, MediaCatalog};

pub use memory::InMemoryBackend;
pub use picker::PlaceholderPicker;

pub type BackendResult<T> = Result<T, BackendError>;

/// Per-id outcome of a delete request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<ItemId>,
    pub failed: Vec<(ItemId, BackendError)>,
}

impl DeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<ItemId> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }
}

/// Reference to a downloadable bundle produced by the backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveRef(pub String);

impl fmt::Display for ArchiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait MediaBackend: Send + Sync {
    fn list_items(&self, kind: LibraryKind) -> BoxFuture<'_, BackendResult<MediaCatalog>>;

    fn delete_items(&self, kind: LibraryKind, ids: Vec<ItemId>) -> BoxFuture<'_, BackendResult<DeleteReport>>;

    fn create_archive(&self, kind: LibraryKind, ids: Vec<ItemId>) -> BoxFuture<'_, BackendResult<ArchiveRef>>;
}

/// Kinds of file a library accepts for upload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Video,
    Image,
    Audio,
}

impl FileKind {
    pub fn accepted_by(kind: LibraryKind) -> &'static [FileKind] {
        match kind {
            LibraryKind::Clips => &[FileKind::Video],
            LibraryKind::Overlays => &[FileKind::Image, FileKind::Video],
            LibraryKind::Audios => &[FileKind::Audio],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Video => "video",
            FileKind::Image => "image",
            FileKind::Audio => "audio",
        }
    }
}

/// A file chosen by the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub kind: FileKind,
}

pub trait FilePicker: Send + Sync {
    fn pick_files(&self, accepted: &'static [FileKind]) -> BoxFuture<'_, BackendResult<Vec<FileHandle>>>;
}
