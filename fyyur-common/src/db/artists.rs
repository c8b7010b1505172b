//! Artist persistence

use crate::db::models::{Artist, ArtistProfile, NamedRecord};
use crate::db::shows;
use crate::genres;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, image_link, \
     facebook_link, website_link, seeking_venue, seeking_description";

fn artist_from_row(row: &SqliteRow) -> Artist {
    let stored_genres: String = row.get("genres");

    Artist {
        id: row.get("id"),
        profile: ArtistProfile {
            name: row.get("name"),
            city: row.get("city"),
            state: row.get("state"),
            phone: row.get("phone"),
            genres: genres::split(&stored_genres),
            image_link: row.get("image_link"),
            facebook_link: row.get("facebook_link"),
            website_link: row.get("website_link"),
            seeking_venue: row.get("seeking_venue"),
            seeking_description: row.get("seeking_description"),
        },
    }
}

/// Insert an artist and return its id
pub async fn insert_artist(conn: &mut SqliteConnection, profile: &ArtistProfile) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, genres, image_link,
            facebook_link, website_link, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&profile.name)
    .bind(&profile.city)
    .bind(&profile.state)
    .bind(&profile.phone)
    .bind(genres::join(&profile.genres))
    .bind(&profile.image_link)
    .bind(&profile.facebook_link)
    .bind(&profile.website_link)
    .bind(profile.seeking_venue)
    .bind(&profile.seeking_description)
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    debug!("Inserted artist {} ({})", id, profile.name);
    Ok(id)
}

/// Replace every editable field of an existing artist
pub async fn update_artist(
    conn: &mut SqliteConnection,
    id: i64,
    profile: &ArtistProfile,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, genres = ?,
            image_link = ?, facebook_link = ?, website_link = ?,
            seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&profile.name)
    .bind(&profile.city)
    .bind(&profile.state)
    .bind(&profile.phone)
    .bind(genres::join(&profile.genres))
    .bind(&profile.image_link)
    .bind(&profile.facebook_link)
    .bind(&profile.website_link)
    .bind(profile.seeking_venue)
    .bind(&profile.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found("Artist", id));
    }
    Ok(())
}

pub async fn get_artist(conn: &mut SqliteConnection, id: i64) -> Result<Option<Artist>> {
    let row = sqlx::query(&format!("SELECT {} FROM artists WHERE id = ?", ARTIST_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(artist_from_row))
}

/// Load an artist by id, failing with `NotFound` when absent
pub async fn require_artist(conn: &mut SqliteConnection, id: i64) -> Result<Artist> {
    get_artist(conn, id)
        .await?
        .ok_or_else(|| Error::not_found("Artist", id))
}

/// Id and name of every artist, ordered by name
pub async fn list_artist_names(conn: &mut SqliteConnection) -> Result<Vec<NamedRecord>> {
    let rows = sqlx::query("SELECT id, name FROM artists ORDER BY name, id")
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

pub async fn artist_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(exists)
}

/// Delete an artist and the shows they perform in
///
/// Same cascade discipline as `venues::delete_venue`.
pub async fn delete_artist(conn: &mut SqliteConnection, id: i64) -> Result<u64> {
    if !artist_exists(conn, id).await? {
        return Err(Error::not_found("Artist", id));
    }

    let removed_shows = shows::delete_shows_for_artist(conn, id).await?;

    sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    debug!("Deleted artist {} and {} show(s)", id, removed_shows);
    Ok(removed_shows)
}
