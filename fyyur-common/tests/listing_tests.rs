//! Listing, detail, search and write-path tests against an in-memory store
//!
//! Every test pins "now" so upcoming/past classification is deterministic.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use fyyur_common::db::{
    artists, init_in_memory_database, shows, venues, ArtistProfile, NewShow, VenueProfile,
};
use fyyur_common::{listing, Error};
use sqlx::SqlitePool;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
}

fn venue(name: &str, city: &str, state: &str) -> VenueProfile {
    VenueProfile {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        genres: vec!["Jazz".to_string(), "Blues".to_string()],
        image_link: Some(format!("https://img.example.com/{}.jpg", name.len())),
        facebook_link: None,
        website_link: Some("https://www.themusicalhop.com".to_string()),
        seeking_talent: true,
        seeking_description: Some("Looking for local artists".to_string()),
    }
}

fn artist(name: &str) -> ArtistProfile {
    ArtistProfile {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: None,
        genres: vec!["Rock n Roll".to_string()],
        image_link: Some("https://img.example.com/artist.jpg".to_string()),
        facebook_link: None,
        website_link: None,
        seeking_venue: true,
        seeking_description: Some("Looking for shows in the bay area".to_string()),
    }
}

/// Seed the three classic venues, three artists and four shows
///
/// Returns (venue ids, artist ids) in insertion order.
async fn seed(pool: &SqlitePool) -> (Vec<i64>, Vec<i64>) {
    let mut tx = pool.begin().await.unwrap();

    let mut venue_ids = Vec::new();
    for (name, city, state) in [
        ("The Musical Hop", "San Francisco", "CA"),
        ("The Dueling Pianos Bar", "New York", "NY"),
        ("Park Square Live Music & Coffee", "San Francisco", "CA"),
    ] {
        venue_ids.push(venues::insert_venue(&mut tx, &venue(name, city, state)).await.unwrap());
    }

    let mut artist_ids = Vec::new();
    for name in ["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"] {
        artist_ids.push(artists::insert_artist(&mut tx, &artist(name)).await.unwrap());
    }

    let plan = [
        (artist_ids[0], venue_ids[0], now() - Duration::days(30)),
        (artist_ids[1], venue_ids[2], now() - Duration::days(2)),
        (artist_ids[2], venue_ids[2], now() + Duration::days(5)),
        (artist_ids[2], venue_ids[2], now()),
    ];
    for (artist_id, venue_id, start_time) in plan {
        shows::insert_show(&mut tx, &NewShow { artist_id, venue_id, start_time })
            .await
            .unwrap();
    }

    tx.commit().await.unwrap();
    (venue_ids, artist_ids)
}

#[tokio::test]
async fn test_locations_list_every_venue() {
    let pool = init_in_memory_database().await.unwrap();
    let (venue_ids, _) = seed(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let groups = listing::venue_locations(&mut conn, &now()).await.unwrap();

    assert_eq!(groups.len(), 2);
    let sf = &groups[0];
    assert_eq!((sf.state.as_str(), sf.city.as_str()), ("CA", "San Francisco"));
    let sf_ids: Vec<i64> = sf.venues.iter().map(|v| v.id).collect();
    assert_eq!(sf_ids, vec![venue_ids[2], venue_ids[0]]);
    assert_eq!(sf.venues[0].num_upcoming_shows, 2);
    assert_eq!(sf.venues[1].num_upcoming_shows, 0);
}

#[tokio::test]
async fn test_venue_detail_partitions_shows() {
    let pool = init_in_memory_database().await.unwrap();
    let (venue_ids, artist_ids) = seed(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let detail = listing::venue_detail(&mut conn, venue_ids[2], &now()).await.unwrap();

    assert_eq!(detail.venue.profile.genres, vec!["Jazz", "Blues"]);
    assert_eq!(detail.shows.past_count(), 1);
    assert_eq!(detail.shows.upcoming_count(), 2);
    assert_eq!(detail.shows.past[0].counterpart_id, artist_ids[1]);
    assert_eq!(detail.shows.past[0].counterpart_name, "Matt Quevedo");

    // The show starting exactly now is upcoming and sorts first
    assert_eq!(detail.shows.upcoming[0].starts_at, now());
    assert_eq!(detail.shows.upcoming[0].start_time, "2026-10-18 20:00:00");
    assert_eq!(detail.shows.upcoming[1].counterpart_name, "The Wild Sax Band");
}

#[tokio::test]
async fn test_artist_detail_resolves_venues() {
    let pool = init_in_memory_database().await.unwrap();
    let (venue_ids, artist_ids) = seed(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let detail = listing::artist_detail(&mut conn, artist_ids[0], &now()).await.unwrap();

    assert!(detail.shows.upcoming.is_empty());
    assert_eq!(detail.shows.past.len(), 1);
    assert_eq!(detail.shows.past[0].counterpart_id, venue_ids[0]);
    assert_eq!(detail.shows.past[0].counterpart_name, "The Musical Hop");
}

#[tokio::test]
async fn test_detail_of_missing_record_is_not_found() {
    let pool = init_in_memory_database().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    assert!(matches!(
        listing::venue_detail(&mut conn, 1, &now()).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        listing::artist_detail(&mut conn, 1, &now()).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_search_venues_case_insensitive() {
    let pool = init_in_memory_database().await.unwrap();
    seed(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let hop = listing::search_venues(&mut conn, "hop", &now()).await.unwrap();
    assert_eq!(hop.count, 1);
    assert_eq!(hop.data[0].name, "The Musical Hop");

    let music = listing::search_venues(&mut conn, "Music", &now()).await.unwrap();
    let names: Vec<&str> = music.data.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Park Square Live Music & Coffee", "The Musical Hop"]);

    let everything = listing::search_venues(&mut conn, "", &now()).await.unwrap();
    assert_eq!(everything.count, 3);
}

#[tokio::test]
async fn test_search_artists_with_upcoming_counts() {
    let pool = init_in_memory_database().await.unwrap();
    seed(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let a = listing::search_artists(&mut conn, "A", &now()).await.unwrap();
    assert_eq!(a.count, 3);

    let band = listing::search_artists(&mut conn, "band", &now()).await.unwrap();
    assert_eq!(band.count, 1);
    assert_eq!(band.data[0].name, "The Wild Sax Band");
    assert_eq!(band.data[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn test_list_shows_denormalized() {
    let pool = init_in_memory_database().await.unwrap();
    seed(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let all = listing::list_shows(&mut conn).await.unwrap();

    assert_eq!(all.len(), 4);
    assert_eq!(all[0].artist_name, "Guns N Petals");
    assert_eq!(all[0].venue_name, "The Musical Hop");
    assert!(all.windows(2).all(|w| w[0].starts_at <= w[1].starts_at));
}

#[tokio::test]
async fn test_list_shows_reports_dangling_reference() {
    let pool = init_in_memory_database().await.unwrap();
    seed(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(&mut *conn)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO shows (artist_id, venue_id, start_time) \
         VALUES (1, 999, '2030-01-01 20:00:00')",
    )
    .execute(&mut *conn)
    .await
    .unwrap();

    let err = listing::list_shows(&mut conn).await.unwrap_err();
    assert!(matches!(err, Error::Integrity(ref msg) if msg.contains("Venue 999")));
}

#[tokio::test]
async fn test_referential_fault_creates_no_row() {
    let pool = init_in_memory_database().await.unwrap();
    let (venue_ids, _) = seed(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    let err = shows::insert_show(
        &mut tx,
        &NewShow {
            artist_id: 4242,
            venue_id: venue_ids[0],
            start_time: now(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Referential(_)));
    drop(tx);

    let mut conn = pool.acquire().await.unwrap();
    assert_eq!(shows::count_shows(&mut conn).await.unwrap(), 4);
}

#[tokio::test]
async fn test_delete_venue_cascades_only_its_shows() {
    let pool = init_in_memory_database().await.unwrap();
    let (venue_ids, artist_ids) = seed(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    let removed = venues::delete_venue(&mut tx, venue_ids[2]).await.unwrap();
    tx.commit().await.unwrap();
    assert_eq!(removed, 3);

    let mut conn = pool.acquire().await.unwrap();
    assert!(venues::get_venue(&mut conn, venue_ids[2]).await.unwrap().is_none());

    // The Wild Sax Band lost both shows, Guns N Petals keeps theirs elsewhere
    let remaining = listing::list_shows(&mut conn).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].venue_id, venue_ids[0]);
    assert!(artists::get_artist(&mut conn, artist_ids[2]).await.unwrap().is_some());
}

#[tokio::test]
async fn test_update_then_refetch() {
    let pool = init_in_memory_database().await.unwrap();
    let (venue_ids, _) = seed(&pool).await;
    let id = venue_ids[1];

    let mut conn = pool.acquire().await.unwrap();
    let before = venues::require_venue(&mut conn, id).await.unwrap();
    drop(conn);

    let mut changed = before.profile.clone();
    changed.name = "The Dueling Pianos Bar & Grill".to_string();
    changed.genres = vec!["Blues".to_string(), "Jazz".to_string(), "Soul".to_string()];
    changed.seeking_talent = false;

    let mut tx = pool.begin().await.unwrap();
    venues::update_venue(&mut tx, id, &changed).await.unwrap();
    tx.commit().await.unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let after = venues::require_venue(&mut conn, id).await.unwrap();
    assert_eq!(after.profile, changed);
    assert_eq!(after.profile.address, before.profile.address);
    assert_eq!(after.profile.phone, before.profile.phone);
}
