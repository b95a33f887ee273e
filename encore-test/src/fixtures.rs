//! Catalog fixtures rooted at `https://x`.

use encore_core::{
    ArtistSummary, CatalogIndex, ConcertDateSet, FullArtistRecord, LocationSet, RelationSet,
};
use indexmap::IndexMap;

use crate::MockUpstream;

/// API root of the fixture catalog.
pub const API_ROOT: &str = "https://x/api";

/// What the origin sends for an id it does not know: a zero-valued artist,
/// 126 bytes with the trailing newline.
pub const ABSENT_BODY: &[u8] = b"{\"id\":0,\"image\":\"\",\"name\":\"\",\"members\":null,\"creationDate\":0,\"firstAlbum\":\"\",\"locations\":\"\",\"concertDates\":\"\",\"relations\":\"\"}\n";

pub fn index() -> CatalogIndex {
    CatalogIndex {
        artists: "https://x/artists".into(),
        locations: "https://x/locations".into(),
        dates: "https://x/dates".into(),
        relation: "https://x/relation".into(),
    }
}

pub fn artist(id: u32) -> ArtistSummary {
    let index = index();
    ArtistSummary {
        id,
        image: format!("https://x/images/{id}.jpeg"),
        name: format!("Artist {id}"),
        members: vec![format!("Singer {id}"), format!("Drummer {id}")],
        creation_date: 1990 + id as i32,
        first_album: format!("01-01-{}", 2000 + id),
        locations_url: index.location_url(id),
        concert_dates_url: index.dates_url(id),
        relations_url: index.relation_url(id),
    }
}

pub fn artists(ids: &[u32]) -> Vec<ArtistSummary> {
    ids.iter().copied().map(artist).collect()
}

pub fn locations(id: u32) -> LocationSet {
    LocationSet {
        id,
        locations: vec!["london-uk".into(), "paris-france".into()],
        dates_url: index().dates_url(id),
    }
}

pub fn concert_dates(id: u32) -> ConcertDateSet {
    ConcertDateSet {
        id,
        dates: vec!["*10-05-2019".into(), "12-05-2019".into()],
    }
}

pub fn relations(id: u32) -> RelationSet {
    let mut dates_locations = IndexMap::new();
    dates_locations.insert("london-uk".to_owned(), vec!["10-05-2019".to_owned()]);
    dates_locations.insert("paris-france".to_owned(), vec!["12-05-2019".to_owned()]);
    RelationSet {
        id,
        dates_locations,
    }
}

pub fn full_record(id: u32) -> FullArtistRecord {
    FullArtistRecord::compose(artist(id), locations(id), concert_dates(id), relations(id))
}

/// An upstream serving the index, the artist list and all four resources of
/// every id in `ids`.
pub fn catalog_upstream(ids: &[u32]) -> MockUpstream {
    let index = index();
    let upstream = MockUpstream::new();
    upstream
        .json(API_ROOT, &index)
        .json(&index.artists, &artists(ids));
    for &id in ids {
        upstream
            .json(&index.artist_url(id), &artist(id))
            .json(&index.location_url(id), &locations(id))
            .json(&index.dates_url(id), &concert_dates(id))
            .json(&index.relation_url(id), &relations(id));
    }
    upstream
}
