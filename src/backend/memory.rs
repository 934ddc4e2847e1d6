//! In-process media backend seeded from a JSON catalog

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::BackendError;
use crate::model::{ItemId, LibraryKind, MediaCatalog, MediaItem};

use super::{ArchiveRef, BackendResult, DeleteReport, MediaBackend};

const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    clips: HashMap<String, Vec<MediaItem>>,
    #[serde(default)]
    overlays: Vec<MediaItem>,
    #[serde(default)]
    audios: Vec<MediaItem>,
}

/// Keeps one catalog per library in memory. Deletions replace the stored
/// catalog; archives are references only.
#[derive(Clone)]
pub struct InMemoryBackend {
    catalogs: Arc<RwLock<HashMap<LibraryKind, MediaCatalog>>>,
    archives_created: Arc<AtomicUsize>,
}

impl InMemoryBackend {
    pub fn new(catalogs: impl IntoIterator<Item = MediaCatalog>) -> Self {
        let mut map: HashMap<LibraryKind, MediaCatalog> = LibraryKind::ALL
            .into_iter()
            .map(|kind| (kind, MediaCatalog::empty(kind)))
            .collect();
        for catalog in catalogs {
            map.insert(catalog.kind(), catalog);
        }
        Self {
            catalogs: Arc::new(RwLock::new(map)),
            archives_created: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sample catalog shipped with the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Seed from a JSON file, or the bundled catalog when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                tracing::info!(path = %path.display(), "Loading catalog seed");
                Self::from_json(&content)
            }
            None => Self::bundled(),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let seed: SeedFile = serde_json::from_str(content)?;
        let clips = MediaCatalog::from_sections(LibraryKind::Clips, seed.clips)?;
        let overlays = MediaCatalog::single(LibraryKind::Overlays, seed.overlays)?;
        let audios = MediaCatalog::single(LibraryKind::Audios, seed.audios)?;
        tracing::debug!(
            clips = clips.len(),
            overlays = overlays.len(),
            audios = audios.len(),
            "Catalog seed parsed"
        );
        Ok(Self::new([clips, overlays, audios]))
    }

    pub fn archives_created(&self) -> usize {
        self.archives_created.load(Ordering::Relaxed)
    }
}

impl MediaBackend for InMemoryBackend {
    fn list_items(&self, kind: LibraryKind) -> BoxFuture<'_, BackendResult<MediaCatalog>> {
        async move {
            let catalogs = self.catalogs.read().await;
            Ok(catalogs
                .get(&kind)
                .cloned()
                .unwrap_or_else(|| MediaCatalog::empty(kind)))
        }
        .boxed()
    }

    fn delete_items(&self, kind: LibraryKind, ids: Vec<ItemId>) -> BoxFuture<'_, BackendResult<DeleteReport>> {
        async move {
            let mut catalogs = self.catalogs.write().await;
            let catalog = catalogs
                .get(&kind)
                .cloned()
                .unwrap_or_else(|| MediaCatalog::empty(kind));

            let mut report = DeleteReport::default();
            for id in ids {
                if catalog.get(id).is_some() {
                    report.deleted.push(id);
                } else {
                    report.failed.push((id, BackendError::ItemNotFound(id)));
                }
            }

            catalogs.insert(kind, catalog.without(&report.deleted));
            tracing::info!(
                kind = kind.segment(),
                deleted = report.deleted.len(),
                failed = report.failed.len(),
                "Delete request processed"
            );
            Ok(report)
        }
        .boxed()
    }

    fn create_archive(&self, kind: LibraryKind, ids: Vec<ItemId>) -> BoxFuture<'_, BackendResult<ArchiveRef>> {
        async move {
            if ids.is_empty() {
                return Err(BackendError::Rejected("nothing to archive".to_string()));
            }

            let catalogs = self.catalogs.read().await;
            if let Some(catalog) = catalogs.get(&kind) {
                if let Some(missing) = ids.iter().copied().find(|id| catalog.get(*id).is_none()) {
                    return Err(BackendError::ItemNotFound(missing));
                }
            }

            self.archives_created.fetch_add(1, Ordering::Relaxed);
            Ok(ArchiveRef(format!("archive://{}/{}-items", kind.segment(), ids.len())))
        }
        .boxed()
    }
}
