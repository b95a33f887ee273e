use std::fmt;

/// The kinds of resource the catalog serves and caches.
///
/// Used to tag log lines, errors and metric labels with what was being
/// resolved when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// The API root listing the four collection URLs.
    CatalogIndex,
    /// The full list of artist summaries.
    ArtistList,
    /// A single artist summary.
    Artist,
    /// The locations an artist toured.
    Locations,
    /// The concert dates of an artist.
    ConcertDates,
    /// The dates-per-location mapping of an artist.
    Relations,
    /// The merged artist record.
    FullRecord,
}

impl ResourceKind {
    /// Stable snake_case name, suitable for metric labels.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::CatalogIndex => "catalog_index",
            ResourceKind::ArtistList => "artist_list",
            ResourceKind::Artist => "artist",
            ResourceKind::Locations => "locations",
            ResourceKind::ConcertDates => "concert_dates",
            ResourceKind::Relations => "relations",
            ResourceKind::FullRecord => "full_record",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
