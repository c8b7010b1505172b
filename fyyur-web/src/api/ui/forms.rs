//! Create/edit forms
//!
//! Edit forms are pre-populated from the stored record; create forms start
//! blank. Field names match what `crate::forms` decodes.

use fyyur_common::db::{ArtistProfile, NamedRecord, VenueProfile};
use fyyur_common::genres::GENRE_CHOICES;

use super::{escape, layout};
use crate::forms::STATE_CHOICES;

fn text_input(label: &str, name: &str, value: Option<&str>, required: bool) -> String {
    format!(
        r#"<label for="{name}">{label}</label>
<input type="text" id="{name}" name="{name}" value="{value}"{required}>"#,
        name = name,
        label = escape(label),
        value = escape(value.unwrap_or_default()),
        required = if required { " required" } else { "" },
    )
}

fn state_select(selected: Option<&str>) -> String {
    let options: Vec<String> = STATE_CHOICES
        .iter()
        .map(|state| {
            let mark = if Some(*state) == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, state, mark)
        })
        .collect();

    format!(
        "<label for=\"state\">State</label>\n<select id=\"state\" name=\"state\" required>\n{}\n</select>",
        options.join("\n")
    )
}

fn genre_select(selected: &[String]) -> String {
    let options: Vec<String> = GENRE_CHOICES
        .iter()
        .map(|genre| {
            let mark = if selected.iter().any(|g| g == genre) { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, escape(genre), mark)
        })
        .collect();

    format!(
        "<label for=\"genres\">Genres</label>\n<select id=\"genres\" name=\"genres\" multiple required>\n{}\n</select>",
        options.join("\n")
    )
}

fn checkbox(label: &str, name: &str, checked: bool) -> String {
    format!(
        r#"<label><input type="checkbox" name="{}" value="y"{}> {}</label>"#,
        name,
        if checked { " checked" } else { "" },
        escape(label)
    )
}

fn textarea(label: &str, name: &str, value: Option<&str>) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n<textarea id=\"{name}\" name=\"{name}\" rows=\"3\">{value}</textarea>",
        name = name,
        label = escape(label),
        value = escape(value.unwrap_or_default()),
    )
}

fn form_page(title: &str, action: &str, fields: &[String], submit: &str) -> String {
    let body = format!(
        "<h1>{title}</h1>\n<form class=\"record\" method=\"post\" action=\"{action}\">\n{fields}\n<button class=\"button\" type=\"submit\">{submit}</button>\n</form>",
        title = escape(title),
        action = escape(action),
        fields = fields.join("\n"),
        submit = escape(submit),
    );
    layout(title, None, &body)
}

/// New venue form, or edit form when `existing` is given
pub fn venue_form_page(existing: Option<(i64, &VenueProfile)>) -> String {
    let (title, action, profile) = match existing {
        Some((id, profile)) => (
            format!("Edit venue {}", profile.name),
            format!("/venues/{}/edit", id),
            Some(profile),
        ),
        None => ("List a new venue".to_string(), "/venues/create".to_string(), None),
    };

    let fields = vec![
        text_input("Name", "name", profile.map(|p| p.name.as_str()), true),
        text_input("City", "city", profile.map(|p| p.city.as_str()), true),
        state_select(profile.map(|p| p.state.as_str())),
        text_input("Address", "address", profile.map(|p| p.address.as_str()), true),
        text_input("Phone", "phone", profile.and_then(|p| p.phone.as_deref()), false),
        genre_select(profile.map(|p| p.genres.as_slice()).unwrap_or_default()),
        text_input(
            "Image link",
            "image_link",
            profile.and_then(|p| p.image_link.as_deref()),
            false,
        ),
        text_input(
            "Facebook link",
            "facebook_link",
            profile.and_then(|p| p.facebook_link.as_deref()),
            false,
        ),
        text_input(
            "Website link",
            "website_link",
            profile.and_then(|p| p.website_link.as_deref()),
            false,
        ),
        checkbox("Seeking talent", "seeking_talent", profile.is_some_and(|p| p.seeking_talent)),
        textarea(
            "Seeking description",
            "seeking_description",
            profile.and_then(|p| p.seeking_description.as_deref()),
        ),
    ];

    let submit = if existing.is_some() { "Save venue" } else { "Create venue" };
    form_page(&title, &action, &fields, submit)
}

/// New artist form, or edit form when `existing` is given
pub fn artist_form_page(existing: Option<(i64, &ArtistProfile)>) -> String {
    let (title, action, profile) = match existing {
        Some((id, profile)) => (
            format!("Edit artist {}", profile.name),
            format!("/artists/{}/edit", id),
            Some(profile),
        ),
        None => ("List a new artist".to_string(), "/artists/create".to_string(), None),
    };

    let fields = vec![
        text_input("Name", "name", profile.map(|p| p.name.as_str()), true),
        text_input("City", "city", profile.map(|p| p.city.as_str()), true),
        state_select(profile.map(|p| p.state.as_str())),
        text_input("Phone", "phone", profile.and_then(|p| p.phone.as_deref()), false),
        genre_select(profile.map(|p| p.genres.as_slice()).unwrap_or_default()),
        text_input(
            "Image link",
            "image_link",
            profile.and_then(|p| p.image_link.as_deref()),
            false,
        ),
        text_input(
            "Facebook link",
            "facebook_link",
            profile.and_then(|p| p.facebook_link.as_deref()),
            false,
        ),
        text_input(
            "Website link",
            "website_link",
            profile.and_then(|p| p.website_link.as_deref()),
            false,
        ),
        checkbox("Seeking venues", "seeking_venue", profile.is_some_and(|p| p.seeking_venue)),
        textarea(
            "Seeking description",
            "seeking_description",
            profile.and_then(|p| p.seeking_description.as_deref()),
        ),
    ];

    let submit = if existing.is_some() { "Save artist" } else { "Create artist" };
    form_page(&title, &action, &fields, submit)
}

fn record_select(label: &str, name: &str, records: &[NamedRecord]) -> String {
    let options: Vec<String> = records
        .iter()
        .map(|r| format!(r#"<option value="{}">{} (ID {})</option>"#, r.id, escape(&r.name), r.id))
        .collect();

    format!(
        "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\" required>\n{options}\n</select>",
        name = name,
        label = escape(label),
        options = options.join("\n"),
    )
}

/// New show form with artist and venue pickers
pub fn show_form_page(artists: &[NamedRecord], venues: &[NamedRecord]) -> String {
    let fields = vec![
        record_select("Artist", "artist_id", artists),
        record_select("Venue", "venue_id", venues),
        "<label for=\"start_time\">Start time</label>\n<input type=\"datetime-local\" id=\"start_time\" name=\"start_time\" required>".to_string(),
    ];

    form_page("List a new show", "/shows/create", &fields, "Create show")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_form_prefilled() {
        let profile = ArtistProfile {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("326-123-5000".to_string()),
            genres: vec!["Rock n Roll".to_string()],
            image_link: None,
            facebook_link: None,
            website_link: Some("https://www.gunsnpetalsband.com".to_string()),
            seeking_venue: true,
            seeking_description: Some("Looking for shows".to_string()),
        };

        let html = artist_form_page(Some((4, &profile)));

        assert!(html.contains(r#"action="/artists/4/edit""#));
        assert!(html.contains(r#"name="name" value="Guns N Petals" required"#));
        assert!(html.contains(r#"<option value="CA" selected>CA</option>"#));
        assert!(html.contains(r#"<option value="Rock n Roll" selected>Rock n Roll</option>"#));
        assert!(html.contains(r#"name="seeking_venue" value="y" checked"#));
        assert!(html.contains(">Looking for shows</textarea>"));
    }

    #[test]
    fn test_create_form_blank() {
        let html = venue_form_page(None);

        assert!(html.contains(r#"action="/venues/create""#));
        assert!(html.contains(r#"name="address" value="" required"#));
        assert!(!html.contains(" checked"));
        assert!(!html.contains(" selected"));
    }
}
