//! Form decoding and validation
//!
//! Submissions arrive as `application/x-www-form-urlencoded` bodies. Genres
//! are a multi-select, so the body is kept as an ordered pair list rather than
//! a map. Validation runs before any transaction is opened.

use fyyur_common::db::{ArtistProfile, NewShow, VenueProfile};
use fyyur_common::genres;
use fyyur_common::time::parse_start_time;
use fyyur_common::{Error, Result};

/// State and territory codes offered by the forms
pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Decoded form body
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value submitted for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted for `key`, in submission order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Trimmed, non-empty value or `Validation`
    fn required(&self, key: &str) -> Result<String> {
        match self.get(key).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(Error::Validation(format!("{} is required", key))),
        }
    }

    /// Trimmed value; blank counts as absent
    fn optional(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// Decode a checkbox value
///
/// An unchecked box is not submitted at all, so absence means false. Only
/// the listed spellings are accepted; "false" is false.
pub fn decode_checkbox(key: &str, value: Option<&str>) -> Result<bool> {
    let Some(value) = value else {
        return Ok(false);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "on" | "true" | "1" => Ok(true),
        "" | "n" | "no" | "off" | "false" | "0" => Ok(false),
        other => Err(Error::Validation(format!(
            "{} must be a checkbox value, got {:?}",
            key, other
        ))),
    }
}

fn validate_state(state: String) -> Result<String> {
    let upper = state.to_ascii_uppercase();
    if STATE_CHOICES.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(Error::Validation(format!("{:?} is not a valid state", state)))
    }
}

fn validate_genres(form: &FormData) -> Result<Vec<String>> {
    let mut selected: Vec<String> = Vec::new();

    for genre in form.get_all("genres").into_iter().map(str::trim) {
        if genre.is_empty() {
            continue;
        }
        if !genres::is_known(genre) {
            return Err(Error::Validation(format!("{:?} is not a valid genre", genre)));
        }
        if !selected.iter().any(|g| g == genre) {
            selected.push(genre.to_string());
        }
    }

    if selected.is_empty() {
        return Err(Error::Validation("genres is required".to_string()));
    }
    Ok(selected)
}

fn validate_url(key: &str, value: Option<String>) -> Result<Option<String>> {
    match value {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => Err(
            Error::Validation(format!("{} must be an http(s) URL", key)),
        ),
        other => Ok(other),
    }
}

fn validate_phone(value: Option<String>) -> Result<Option<String>> {
    match value {
        Some(phone)
            if !phone
                .chars()
                .all(|c| c.is_ascii_digit() || " -+().".contains(c)) =>
        {
            Err(Error::Validation(format!("{:?} is not a valid phone number", phone)))
        }
        other => Ok(other),
    }
}

/// Venue create/edit submission
pub fn venue_profile(form: &FormData) -> Result<VenueProfile> {
    Ok(VenueProfile {
        name: form.required("name")?,
        city: form.required("city")?,
        state: validate_state(form.required("state")?)?,
        address: form.required("address")?,
        phone: validate_phone(form.optional("phone"))?,
        genres: validate_genres(form)?,
        image_link: validate_url("image_link", form.optional("image_link"))?,
        facebook_link: validate_url("facebook_link", form.optional("facebook_link"))?,
        website_link: validate_url("website_link", form.optional("website_link"))?,
        seeking_talent: decode_checkbox("seeking_talent", form.get("seeking_talent"))?,
        seeking_description: form.optional("seeking_description"),
    })
}

/// Artist create/edit submission
pub fn artist_profile(form: &FormData) -> Result<ArtistProfile> {
    Ok(ArtistProfile {
        name: form.required("name")?,
        city: form.required("city")?,
        state: validate_state(form.required("state")?)?,
        phone: validate_phone(form.optional("phone"))?,
        genres: validate_genres(form)?,
        image_link: validate_url("image_link", form.optional("image_link"))?,
        facebook_link: validate_url("facebook_link", form.optional("facebook_link"))?,
        website_link: validate_url("website_link", form.optional("website_link"))?,
        seeking_venue: decode_checkbox("seeking_venue", form.get("seeking_venue"))?,
        seeking_description: form.optional("seeking_description"),
    })
}

fn parse_id(form: &FormData, key: &str) -> Result<i64> {
    let raw = form.required(key)?;
    raw.parse()
        .map_err(|_| Error::Validation(format!("{} must be a number, got {:?}", key, raw)))
}

/// Show create submission
pub fn new_show(form: &FormData) -> Result<NewShow> {
    Ok(NewShow {
        artist_id: parse_id(form, "artist_id")?,
        venue_id: parse_id(form, "venue_id")?,
        start_time: parse_start_time(form.get("start_time").unwrap_or_default())?,
    })
}
