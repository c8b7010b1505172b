//! Venue persistence
//!
//! Every function takes the caller's connection, which is either a pooled
//! connection (reads) or an open transaction (writes). Nothing here commits.

use crate::db::models::{NamedRecord, Venue, VenueProfile};
use crate::db::shows;
use crate::genres;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, genres, image_link, \
     facebook_link, website_link, seeking_talent, seeking_description";

fn venue_from_row(row: &SqliteRow) -> Venue {
    let stored_genres: String = row.get("genres");

    Venue {
        id: row.get("id"),
        profile: VenueProfile {
            name: row.get("name"),
            city: row.get("city"),
            state: row.get("state"),
            address: row.get("address"),
            phone: row.get("phone"),
            genres: genres::split(&stored_genres),
            image_link: row.get("image_link"),
            facebook_link: row.get("facebook_link"),
            website_link: row.get("website_link"),
            seeking_talent: row.get("seeking_talent"),
            seeking_description: row.get("seeking_description"),
        },
    }
}

/// Insert a venue and return its id
pub async fn insert_venue(conn: &mut SqliteConnection, profile: &VenueProfile) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, genres, image_link,
            facebook_link, website_link, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&profile.name)
    .bind(&profile.city)
    .bind(&profile.state)
    .bind(&profile.address)
    .bind(&profile.phone)
    .bind(genres::join(&profile.genres))
    .bind(&profile.image_link)
    .bind(&profile.facebook_link)
    .bind(&profile.website_link)
    .bind(profile.seeking_talent)
    .bind(&profile.seeking_description)
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    debug!("Inserted venue {} ({})", id, profile.name);
    Ok(id)
}

/// Replace every editable field of an existing venue
pub async fn update_venue(
    conn: &mut SqliteConnection,
    id: i64,
    profile: &VenueProfile,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?, genres = ?,
            image_link = ?, facebook_link = ?, website_link = ?,
            seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&profile.name)
    .bind(&profile.city)
    .bind(&profile.state)
    .bind(&profile.address)
    .bind(&profile.phone)
    .bind(genres::join(&profile.genres))
    .bind(&profile.image_link)
    .bind(&profile.facebook_link)
    .bind(&profile.website_link)
    .bind(profile.seeking_talent)
    .bind(&profile.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found("Venue", id));
    }
    Ok(())
}

/// Load a venue by id
pub async fn get_venue(conn: &mut SqliteConnection, id: i64) -> Result<Option<Venue>> {
    let row = sqlx::query(&format!("SELECT {} FROM venues WHERE id = ?", VENUE_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(venue_from_row))
}

/// Load a venue by id, failing with `NotFound` when absent
pub async fn require_venue(conn: &mut SqliteConnection, id: i64) -> Result<Venue> {
    get_venue(conn, id)
        .await?
        .ok_or_else(|| Error::not_found("Venue", id))
}

/// Every venue, ordered by state, city, name
pub async fn list_venues(conn: &mut SqliteConnection) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM venues ORDER BY state, city, name, id",
        VENUE_COLUMNS
    ))
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(venue_from_row).collect())
}

/// Id and name of every venue, ordered by name
pub async fn list_venue_names(conn: &mut SqliteConnection) -> Result<Vec<NamedRecord>> {
    let rows = sqlx::query("SELECT id, name FROM venues ORDER BY name, id")
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .iter()
        .map(|row| NamedRecord {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

pub async fn venue_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(exists)
}

/// Delete a venue and the shows it hosts
///
/// Shows go first so the foreign keys never dangle. Returns the number of
/// shows removed. Must run inside a transaction for the pair to be atomic.
pub async fn delete_venue(conn: &mut SqliteConnection, id: i64) -> Result<u64> {
    if !venue_exists(conn, id).await? {
        return Err(Error::not_found("Venue", id));
    }

    let removed_shows = shows::delete_shows_for_venue(conn, id).await?;

    sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    debug!("Deleted venue {} and {} show(s)", id, removed_shows);
    Ok(removed_shows)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::init::init_in_memory_database;

    pub(crate) fn sample_venue(name: &str, city: &str, state: &str) -> VenueProfile {
        VenueProfile {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            genres: vec!["Jazz".to_string(), "Reggae".to_string()],
            image_link: None,
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            website_link: None,
            seeking_talent: true,
            seeking_description: Some("We are on the lookout for a local artist".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_venue() {
        let pool = init_in_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let profile = sample_venue("The Musical Hop", "San Francisco", "CA");
        let id = insert_venue(&mut conn, &profile).await.unwrap();

        let loaded = require_venue(&mut conn, id).await.unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.profile, profile);
    }

    #[tokio::test]
    async fn test_update_missing_venue_is_not_found() {
        let pool = init_in_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let profile = sample_venue("Nowhere", "Nowhere", "NV");
        let err = update_venue(&mut conn, 404, &profile).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_require_missing_venue() {
        let pool = init_in_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        assert!(get_venue(&mut conn, 1).await.unwrap().is_none());
        assert!(matches!(
            require_venue(&mut conn, 1).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rolled_back_insert_leaves_no_row() {
        let pool = init_in_memory_database().await.unwrap();

        {
            let mut tx = pool.begin().await.unwrap();
            insert_venue(&mut tx, &sample_venue("Ghost", "Austin", "TX"))
                .await
                .unwrap();
            // dropped without commit
        }

        let mut conn = pool.acquire().await.unwrap();
        assert!(list_venues(&mut conn).await.unwrap().is_empty());
    }
}
