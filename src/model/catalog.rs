//! Media items and the per-library catalogs that hold them

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::error::CatalogError;

/// Player tabs of the clips library, in display order
pub const CLIP_CATEGORIES: &[&str] = &["Ronaldo", "Messi", "Neymar", "Mbappé", "Yamal"];

/// Label of the implicit category used by libraries without tabs
pub const ALL_CATEGORY: &str = "All";

const SINGLE_CATEGORY: &[&str] = &[ALL_CATEGORY];

/// Stable identifier of a media item within its catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type tag shown on overlay thumbnails
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Animated,
    Static,
}

impl MediaType {
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Animated => "animated",
            MediaType::Static => "static",
        }
    }
}

/// One entry of a library. Never mutated once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MediaItem {
    pub id: ItemId,
    pub title: String,
    /// Artist for audios, unused elsewhere
    #[serde(default, alias = "artist")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<MediaType>,
    /// Opaque preview reference
    #[serde(default)]
    pub thumbnail: String,
}

impl MediaItem {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            subtitle: None,
            duration: None,
            media_type: None,
            thumbnail: String::new(),
        }
    }

    /// Duration label to display, if any. Static overlays never show one.
    pub fn duration_label(&self) -> Option<&str> {
        match self.media_type {
            Some(MediaType::Static) => None,
            _ => self.duration.as_deref(),
        }
    }
}

/// The three media libraries reachable from the menu
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LibraryKind {
    Clips,
    Overlays,
    Audios,
}

impl LibraryKind {
    pub const ALL: [LibraryKind; 3] = [LibraryKind::Clips, LibraryKind::Overlays, LibraryKind::Audios];

    pub fn title(self) -> &'static str {
        match self {
            LibraryKind::Clips => "Clips",
            LibraryKind::Overlays => "Overlays",
            LibraryKind::Audios => "Audios",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            LibraryKind::Clips => "Football player clips",
            LibraryKind::Overlays => "Video overlays & effects",
            LibraryKind::Audios => "Background music & sounds",
        }
    }

    /// Path segment used by routes (`/clips`, `/overlays`, `/audios`)
    pub fn segment(self) -> &'static str {
        match self {
            LibraryKind::Clips => "clips",
            LibraryKind::Overlays => "overlays",
            LibraryKind::Audios => "audios",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.segment() == segment)
    }

    /// Singular noun used in log lines and dialog titles
    pub fn item_noun(self) -> &'static str {
        match self {
            LibraryKind::Clips => "clip",
            LibraryKind::Overlays => "overlay",
            LibraryKind::Audios => "audio",
        }
    }

    /// Fixed, enumerable category labels of this library
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            LibraryKind::Clips => CLIP_CATEGORIES,
            LibraryKind::Overlays | LibraryKind::Audios => SINGLE_CATEGORY,
        }
    }

    pub fn has_tabs(self) -> bool {
        self.categories().len() > 1
    }

    pub fn default_category(self) -> &'static str {
        self.categories()[0]
    }

    /// Resolve a label to its canonical static form
    pub fn category(self, label: &str) -> Result<&'static str, CatalogError> {
        self.categories()
            .iter()
            .copied()
            .find(|c| *c == label)
            .ok_or_else(|| CatalogError::UnknownCategory(label.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct CategorySection {
    label: &'static str,
    items: Vec<MediaItem>,
}

/// Snapshot of a library's items grouped by category.
///
/// Every category of the library maps to a (possibly empty) sequence.
/// Removal produces a new catalog instead of mutating this one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaCatalog {
    kind: LibraryKind,
    sections: Vec<CategorySection>,
}

impl MediaCatalog {
    pub fn empty(kind: LibraryKind) -> Self {
        Self {
            kind,
            sections: kind
                .categories()
                .iter()
                .map(|label| CategorySection {
                    label: *label,
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    /// Build a catalog from labelled groups. Missing categories stay empty.
    pub fn from_sections<L, I>(kind: LibraryKind, groups: I) -> Result<Self, CatalogError>
    where
        L: AsRef<str>,
        I: IntoIterator<Item = (L, Vec<MediaItem>)>,
    {
        let mut catalog = Self::empty(kind);
        let mut seen = HashSet::new();

        for (label, items) in groups {
            let label = kind.category(label.as_ref())?;
            for item in &items {
                if !seen.insert(item.id) {
                    return Err(CatalogError::DuplicateItem(item.id));
                }
            }
            if let Some(section) = catalog.sections.iter_mut().find(|s| s.label == label) {
                section.items.extend(items);
            }
        }

        Ok(catalog)
    }

    /// Catalog of a library without tabs
    pub fn single(kind: LibraryKind, items: Vec<MediaItem>) -> Result<Self, CatalogError> {
        Self::from_sections(kind, [(kind.default_category(), items)])
    }

    pub fn kind(&self) -> LibraryKind {
        self.kind
    }

    pub fn categories(&self) -> &'static [&'static str] {
        self.kind.categories()
    }

    pub fn items_for(&self, category: &str) -> Result<&[MediaItem], CatalogError> {
        self.sections
            .iter()
            .find(|s| s.label == category)
            .map(|s| s.items.as_slice())
            .ok_or_else(|| CatalogError::UnknownCategory(category.to_string()))
    }

    /// Every item in category order, then load order
    pub fn all_items(&self) -> Vec<&MediaItem> {
        self.sections.iter().flat_map(|s| s.items.iter()).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: ItemId) -> Option<&MediaItem> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|item| item.id == id)
    }

    /// New catalog with the given ids removed
    pub fn without(&self, removed: &[ItemId]) -> Self {
        let removed: HashSet<ItemId> = removed.iter().copied().collect();
        Self {
            kind: self.kind,
            sections: self
                .sections
                .iter()
                .map(|s| CategorySection {
                    label: s.label,
                    items: s
                        .items
                        .iter()
                        .filter(|item| !removed.contains(&item.id))
                        .cloned()
                        .collect(),
                })
                .collect(),
        }
    }
}
