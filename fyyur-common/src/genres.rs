//! Genre list codec
//!
//! Genres are stored as one comma-delimited column. `join` and `split` are
//! the only places that know about the delimiter.

/// Delimiter used in the stored column
pub const DELIMITER: char = ',';

/// Genres offered by the venue and artist forms
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Encode a genre list for storage
pub fn join<S: AsRef<str>>(genres: &[S]) -> String {
    genres
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Decode a stored genre column, preserving order
///
/// Empty segments are dropped, so an empty column yields an empty list.
pub fn split(stored: &str) -> Vec<String> {
    stored
        .split(DELIMITER)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// True if `genre` is one of the form choices
pub fn is_known(genre: &str) -> bool {
    GENRE_CHOICES.contains(&genre)
}
