//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Editable fields of a venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueProfile {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    #[serde(flatten)]
    pub profile: VenueProfile,
}

/// Editable fields of an artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistProfile {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    #[serde(flatten)]
    pub profile: ArtistProfile,
}

/// A performance linking one artist to one venue, before insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

/// Id and name only, for listings and search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRecord {
    pub id: i64,
    pub name: String,
}

/// Which side of a show a query is anchored on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Venue,
    Artist,
}

impl Party {
    /// Foreign key column in `shows` pointing at this party
    pub fn show_column(self) -> &'static str {
        match self {
            Party::Venue => "venue_id",
            Party::Artist => "artist_id",
        }
    }

    /// The party on the other end of a show
    pub fn counterpart(self) -> Party {
        match self {
            Party::Venue => Party::Artist,
            Party::Artist => Party::Venue,
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            Party::Venue => "venues",
            Party::Artist => "artists",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Party::Venue => "Venue",
            Party::Artist => "Artist",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_counterpart_columns() {
        assert_eq!(Party::Venue.show_column(), "venue_id");
        assert_eq!(Party::Venue.counterpart().show_column(), "artist_id");
        assert_eq!(Party::Artist.counterpart().table(), "venues");
    }
}
