//! Derived views over venues, artists and shows
//!
//! Upcoming vs. past is decided here, against the `now` the caller passes in:
//! a show starting at or after `now` is upcoming, anything earlier is past.
//! The pure helpers (`partition_by_start`, `count_upcoming`,
//! `group_by_location`, `matches_term`) hold the logic; the async functions
//! only load rows and hand them over.

use crate::db::models::{Artist, NamedRecord, Party, Venue};
use crate::db::shows::{self, ShowCounterpartRow};
use crate::db::{artists, venues};
use crate::time::format_start_time;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::SqliteConnection;
use std::collections::{BTreeMap, HashMap};
use tracing::error;

/// Items split around a reference instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Partitioned<T> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// Upcoming is inclusive of `now`
pub fn is_upcoming(start_time: &NaiveDateTime, now: &NaiveDateTime) -> bool {
    start_time >= now
}

/// Split `items` into past and upcoming, keeping input order in each half
pub fn partition_by_start<T, F>(items: Vec<T>, now: &NaiveDateTime, start_of: F) -> Partitioned<T>
where
    F: Fn(&T) -> NaiveDateTime,
{
    let (upcoming, past): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| is_upcoming(&start_of(item), now));
    Partitioned { past, upcoming }
}

/// Number of upcoming shows per party id
///
/// Ids without upcoming shows are absent from the map.
pub fn count_upcoming<I>(start_times: I, now: &NaiveDateTime) -> HashMap<i64, usize>
where
    I: IntoIterator<Item = (i64, NaiveDateTime)>,
{
    let mut counts = HashMap::new();
    for (id, start_time) in start_times {
        if is_upcoming(&start_time, now) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
}

/// Case-insensitive substring match; an empty term matches every name
pub fn matches_term(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

// ----------------------------------------------------------------------------
// Venue listing
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues of one (state, city)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Group venues by location
///
/// Groups are ordered by state then city; venues inside a group by name then
/// id. Every venue lands in exactly one group.
pub fn group_by_location(
    all_venues: &[Venue],
    upcoming: &HashMap<i64, usize>,
) -> Vec<LocationGroup> {
    let mut groups: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();

    for venue in all_venues {
        let key = (venue.profile.state.clone(), venue.profile.city.clone());
        groups.entry(key).or_default().push(VenueSummary {
            id: venue.id,
            name: venue.profile.name.clone(),
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
        });
    }

    groups
        .into_iter()
        .map(|((state, city), mut venues)| {
            venues.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            LocationGroup { city, state, venues }
        })
        .collect()
}

/// Venues grouped by location with their upcoming show counts
pub async fn venue_locations(
    conn: &mut SqliteConnection,
    now: &NaiveDateTime,
) -> Result<Vec<LocationGroup>> {
    let all_venues = venues::list_venues(conn).await?;
    let start_times = shows::start_times_by(conn, Party::Venue).await?;
    let upcoming = count_upcoming(start_times, now);
    Ok(group_by_location(&all_venues, &upcoming))
}

// ----------------------------------------------------------------------------
// Detail views
// ----------------------------------------------------------------------------

/// One show seen from a venue or artist page
///
/// `counterpart_*` is the artist on a venue page and the venue on an artist
/// page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowEntry {
    pub show_id: i64,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: String,
    #[serde(skip)]
    pub starts_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: Partitioned<ShowEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: Partitioned<ShowEntry>,
}

fn resolve_entry(party: Party, anchor_id: i64, row: ShowCounterpartRow) -> Result<ShowEntry> {
    let other = party.counterpart();
    let counterpart_name = row.counterpart_name.ok_or_else(|| {
        error!(
            "Show {} of {} {} references missing {} {}",
            row.show_id,
            party.label(),
            anchor_id,
            other.label(),
            row.counterpart_id
        );
        Error::Integrity(format!(
            "Show {} references missing {} {}",
            row.show_id,
            other.label(),
            row.counterpart_id
        ))
    })?;

    Ok(ShowEntry {
        show_id: row.show_id,
        counterpart_id: row.counterpart_id,
        counterpart_name,
        counterpart_image_link: row.counterpart_image_link,
        start_time: format_start_time(&row.start_time),
        starts_at: row.start_time,
    })
}

async fn partitioned_shows(
    conn: &mut SqliteConnection,
    party: Party,
    id: i64,
    now: &NaiveDateTime,
) -> Result<Partitioned<ShowEntry>> {
    let entries = shows::counterparts_for(conn, party, id)
        .await?
        .into_iter()
        .map(|row| resolve_entry(party, id, row))
        .collect::<Result<Vec<_>>>()?;

    Ok(partition_by_start(entries, now, |entry| entry.starts_at))
}

/// Venue page: the venue plus its past and upcoming shows
pub async fn venue_detail(
    conn: &mut SqliteConnection,
    id: i64,
    now: &NaiveDateTime,
) -> Result<VenueDetail> {
    let venue = venues::require_venue(conn, id).await?;
    let shows = partitioned_shows(conn, Party::Venue, id, now).await?;
    Ok(VenueDetail { venue, shows })
}

/// Artist page: the artist plus their past and upcoming shows
pub async fn artist_detail(
    conn: &mut SqliteConnection,
    id: i64,
    now: &NaiveDateTime,
) -> Result<ArtistDetail> {
    let artist = artists::require_artist(conn, id).await?;
    let shows = partitioned_shows(conn, Party::Artist, id, now).await?;
    Ok(ArtistDetail { artist, shows })
}

// ----------------------------------------------------------------------------
// Search
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

/// Filter named records by `term` and attach upcoming counts
pub fn search_records(
    records: Vec<NamedRecord>,
    term: &str,
    upcoming: &HashMap<i64, usize>,
) -> SearchResults {
    let data: Vec<SearchHit> = records
        .into_iter()
        .filter(|record| matches_term(&record.name, term))
        .map(|record| SearchHit {
            num_upcoming_shows: upcoming.get(&record.id).copied().unwrap_or(0),
            id: record.id,
            name: record.name,
        })
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}

pub async fn search_venues(
    conn: &mut SqliteConnection,
    term: &str,
    now: &NaiveDateTime,
) -> Result<SearchResults> {
    let records = venues::list_venue_names(conn).await?;
    let upcoming = count_upcoming(shows::start_times_by(conn, Party::Venue).await?, now);
    Ok(search_records(records, term, &upcoming))
}

pub async fn search_artists(
    conn: &mut SqliteConnection,
    term: &str,
    now: &NaiveDateTime,
) -> Result<SearchResults> {
    let records = artists::list_artist_names(conn).await?;
    let upcoming = count_upcoming(shows::start_times_by(conn, Party::Artist).await?, now);
    Ok(search_records(records, term, &upcoming))
}

// ----------------------------------------------------------------------------
// Show listing
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
    #[serde(skip)]
    pub starts_at: NaiveDateTime,
}

/// Every show with both ends resolved, ordered by start time
///
/// A show whose venue or artist is missing fails the whole listing with
/// `Integrity`; it is never skipped.
pub async fn list_shows(conn: &mut SqliteConnection) -> Result<Vec<ShowListing>> {
    shows::list_show_joins(conn)
        .await?
        .into_iter()
        .map(|row| {
            let venue_name = row.venue_name.ok_or_else(|| {
                error!("Show {} references missing venue {}", row.show_id, row.venue_id);
                Error::Integrity(format!(
                    "Show {} references missing Venue {}",
                    row.show_id, row.venue_id
                ))
            })?;
            let artist_name = row.artist_name.ok_or_else(|| {
                error!("Show {} references missing artist {}", row.show_id, row.artist_id);
                Error::Integrity(format!(
                    "Show {} references missing Artist {}",
                    row.show_id, row.artist_id
                ))
            })?;

            Ok(ShowListing {
                show_id: row.show_id,
                venue_id: row.venue_id,
                venue_name,
                venue_image_link: row.venue_image_link,
                artist_id: row.artist_id,
                artist_name,
                artist_image_link: row.artist_image_link,
                start_time: format_start_time(&row.start_time),
                starts_at: row.start_time,
            })
        })
        .collect()
}

/// Every artist as id and name
pub async fn list_artists(conn: &mut SqliteConnection) -> Result<Vec<NamedRecord>> {
    artists::list_artist_names(conn).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::VenueProfile;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id,
            profile: VenueProfile {
                name: name.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                address: String::new(),
                phone: None,
                genres: vec![],
                image_link: None,
                facebook_link: None,
                website_link: None,
                seeking_talent: false,
                seeking_description: None,
            },
        }
    }

    #[test]
    fn test_show_exactly_now_is_upcoming() {
        let now = now();
        assert!(is_upcoming(&now, &now));
        assert!(!is_upcoming(&(now - Duration::seconds(1)), &now));
        assert!(is_upcoming(&(now + Duration::seconds(1)), &now));
    }

    #[test]
    fn test_partition_keeps_order_within_halves() {
        let now = now();
        let times = vec![
            now - Duration::days(3),
            now - Duration::days(1),
            now,
            now + Duration::days(2),
        ];

        let split = partition_by_start(times.clone(), &now, |t| *t);
        assert_eq!(split.past, vec![times[0], times[1]]);
        assert_eq!(split.upcoming, vec![times[2], times[3]]);
        assert_eq!(split.past_count(), 2);
        assert_eq!(split.upcoming_count(), 2);
    }

    #[test]
    fn test_count_upcoming_ignores_past() {
        let now = now();
        let counts = count_upcoming(
            vec![
                (1, now + Duration::hours(1)),
                (1, now - Duration::hours(1)),
                (1, now + Duration::days(7)),
                (2, now - Duration::days(7)),
            ],
            &now,
        );

        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), None);
    }

    #[test]
    fn test_group_lists_every_venue_of_a_location() {
        let all = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
        ];
        let upcoming = HashMap::from([(3, 1)]);

        let groups = group_by_location(&all, &upcoming);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].state, "CA");
        assert_eq!(groups[0].city, "San Francisco");
        assert_eq!(
            groups[0].venues,
            vec![
                VenueSummary {
                    id: 3,
                    name: "Park Square Live Music & Coffee".to_string(),
                    num_upcoming_shows: 1,
                },
                VenueSummary {
                    id: 1,
                    name: "The Musical Hop".to_string(),
                    num_upcoming_shows: 0,
                },
            ]
        );
        assert_eq!(groups[1].state, "NY");
        assert_eq!(groups[1].venues.len(), 1);
    }

    #[test]
    fn test_groups_ordered_by_state_then_city() {
        let all = vec![
            venue(1, "A", "Seattle", "WA"),
            venue(2, "B", "Oakland", "CA"),
            venue(3, "C", "Los Angeles", "CA"),
        ];

        let locations: Vec<(String, String)> = group_by_location(&all, &HashMap::new())
            .into_iter()
            .map(|g| (g.state, g.city))
            .collect();

        assert_eq!(
            locations,
            vec![
                ("CA".to_string(), "Los Angeles".to_string()),
                ("CA".to_string(), "Oakland".to_string()),
                ("WA".to_string(), "Seattle".to_string()),
            ]
        );
    }

    #[test]
    fn test_term_matching() {
        assert!(matches_term("The Musical Hop", "hop"));
        assert!(matches_term("The Musical Hop", "music"));
        assert!(matches_term("Park Square Live Music & Coffee", "MUSIC"));
        assert!(!matches_term("The Dueling Pianos Bar", "music"));
        assert!(matches_term("Anything at all", ""));
        assert!(matches_term("Café Öl", "café ö"));
    }

    #[test]
    fn test_search_records_counts_matches() {
        let records = vec![
            NamedRecord {
                id: 1,
                name: "The Musical Hop".to_string(),
            },
            NamedRecord {
                id: 2,
                name: "The Dueling Pianos Bar".to_string(),
            },
            NamedRecord {
                id: 3,
                name: "Park Square Live Music & Coffee".to_string(),
            },
        ];
        let upcoming = HashMap::from([(3, 4)]);

        let results = search_records(records, "Music", &upcoming);

        assert_eq!(results.count, 2);
        let ids: Vec<i64> = results.data.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(results.data[1].num_upcoming_shows, 4);
    }
}
