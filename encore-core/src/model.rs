//! Catalog resource shapes.
//!
//! Field names on the wire follow the upstream JSON (`creationDate`,
//! `datesLocations`, ...). Every type round-trips through `serde_json`
//! unchanged, which is what the cache stores.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The API root: one URL per collection.
///
/// Every other resource URL is derived from it as `{collection}/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIndex {
    pub artists: String,
    pub locations: String,
    pub dates: String,
    pub relation: String,
}

impl CatalogIndex {
    pub fn artist_url(&self, id: u32) -> String {
        format!("{}/{}", self.artists, id)
    }

    pub fn location_url(&self, id: u32) -> String {
        format!("{}/{}", self.locations, id)
    }

    pub fn dates_url(&self, id: u32) -> String {
        format!("{}/{}", self.dates, id)
    }

    pub fn relation_url(&self, id: u32) -> String {
        format!("{}/{}", self.relation, id)
    }
}

/// One artist as listed by the origin, without its tour data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: u32,
    pub image: String,
    pub name: String,
    pub members: Vec<String>,
    #[serde(rename = "creationDate")]
    pub creation_date: i32,
    #[serde(rename = "firstAlbum")]
    pub first_album: String,
    #[serde(rename = "locations")]
    pub locations_url: String,
    #[serde(rename = "concertDates")]
    pub concert_dates_url: String,
    #[serde(rename = "relations")]
    pub relations_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSet {
    pub id: u32,
    pub locations: Vec<String>,
    #[serde(rename = "dates")]
    pub dates_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcertDateSet {
    pub id: u32,
    pub dates: Vec<String>,
}

/// Which dates the artist played at which location.
///
/// Keys keep the order the origin sent them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSet {
    pub id: u32,
    #[serde(rename = "datesLocations")]
    pub dates_locations: IndexMap<String, Vec<String>>,
}

/// An artist merged with its locations, dates and relations.
///
/// A successfully composed record always has `error == None` and the same
/// `id` in all four parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullArtistRecord {
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub id: u32,
    pub image: String,
    pub name: String,
    pub members: Vec<String>,
    #[serde(rename = "creationDate")]
    pub creation_date: i32,
    #[serde(rename = "firstAlbum")]
    pub first_album: String,
    #[serde(rename = "artistsLocations")]
    pub locations: LocationSet,
    #[serde(rename = "artistsConcertDates")]
    pub concert_dates: ConcertDateSet,
    #[serde(rename = "artistsRelations")]
    pub relations: RelationSet,
}

impl FullArtistRecord {
    /// Field-by-field merge of the four resolved parts.
    pub fn compose(
        artist: ArtistSummary,
        locations: LocationSet,
        concert_dates: ConcertDateSet,
        relations: RelationSet,
    ) -> Self {
        FullArtistRecord {
            error: None,
            id: artist.id,
            image: artist.image,
            name: artist.name,
            members: artist.members,
            creation_date: artist.creation_date,
            first_album: artist.first_album,
            locations,
            concert_dates,
            relations,
        }
    }

    /// An empty record carrying only a failure message, for renderers.
    pub fn failed(message: impl Into<String>) -> Self {
        FullArtistRecord {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// The artist list view: the index it was resolved from plus every artist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistsPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub index: CatalogIndex,
    pub artists: Vec<ArtistSummary>,
}

impl ArtistsPage {
    pub fn new(index: CatalogIndex, artists: Vec<ArtistSummary>) -> Self {
        ArtistsPage {
            error: None,
            index,
            artists,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ArtistsPage {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> CatalogIndex {
        CatalogIndex {
            artists: "https://x/artists".into(),
            locations: "https://x/locations".into(),
            dates: "https://x/dates".into(),
            relation: "https://x/relation".into(),
        }
    }

    #[test]
    fn derived_urls_append_id() {
        let index = index();
        assert_eq!(index.artist_url(5), "https://x/artists/5");
        assert_eq!(index.location_url(5), "https://x/locations/5");
        assert_eq!(index.dates_url(5), "https://x/dates/5");
        assert_eq!(index.relation_url(5), "https://x/relation/5");
    }

    #[test]
    fn artist_summary_reads_upstream_field_names() {
        let json = r#"{
            "id": 1,
            "image": "https://x/img/queen.jpeg",
            "name": "Queen",
            "members": ["Freddie Mercury", "Brian May"],
            "creationDate": 1970,
            "firstAlbum": "14-12-1973",
            "locations": "https://x/locations/1",
            "concertDates": "https://x/dates/1",
            "relations": "https://x/relation/1"
        }"#;
        let artist: ArtistSummary = serde_json::from_str(json).unwrap();
        assert_eq!(artist.id, 1);
        assert_eq!(artist.creation_date, 1970);
        assert_eq!(artist.first_album, "14-12-1973");
        assert_eq!(artist.concert_dates_url, "https://x/dates/1");
    }

    #[test]
    fn relation_keeps_origin_key_order() {
        let json = r#"{"id":2,"datesLocations":{"z-city":["01-01-2020"],"a-city":["02-02-2020"]}}"#;
        let relation: RelationSet = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = relation.dates_locations.keys().cloned().collect();
        assert_eq!(keys, vec!["z-city", "a-city"]);
        assert_eq!(serde_json::to_string(&relation).unwrap(), json);
    }

    #[test]
    fn composed_record_has_no_error_field() {
        let record = FullArtistRecord::compose(
            ArtistSummary {
                id: 3,
                name: "Pink Floyd".into(),
                ..Default::default()
            },
            LocationSet {
                id: 3,
                ..Default::default()
            },
            ConcertDateSet {
                id: 3,
                ..Default::default()
            },
            RelationSet {
                id: 3,
                ..Default::default()
            },
        );
        assert_eq!(record.error, None);
        assert_eq!(record.name, "Pink Floyd");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("Error").is_none());
        assert_eq!(json["artistsLocations"]["id"], 3);
    }

    #[test]
    fn failed_record_carries_message() {
        let record = FullArtistRecord::failed("Page not found");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Error"], "Page not found");
    }
}
