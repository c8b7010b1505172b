//! Artist listing and detail pages

use fyyur_common::db::NamedRecord;
use fyyur_common::listing::ArtistDetail;

use super::shows::partitioned_sections;
use super::{escape, external_link, genre_badges, layout, search_box, Notice};

pub fn artists_page(artists: &[NamedRecord], notice: Option<&Notice>) -> String {
    let items: Vec<String> = artists
        .iter()
        .map(|artist| {
            format!(
                r#"<li><a href="/artists/{}">{}</a></li>"#,
                artist.id,
                escape(&artist.name)
            )
        })
        .collect();

    let listing = if items.is_empty() {
        "<p>No artists listed yet.</p>".to_string()
    } else {
        format!("<ul class=\"item-list\">\n{}\n</ul>", items.join("\n"))
    };

    let body = format!(
        "<h1>Artists</h1>\n{}\n{}",
        search_box("/artists/search", "Find an artist", ""),
        listing
    );

    layout("Artists", notice, &body)
}

pub fn artist_detail_page(detail: &ArtistDetail, notice: Option<&Notice>) -> String {
    let artist = &detail.artist;
    let profile = &artist.profile;

    let seeking = if profile.seeking_venue {
        format!(
            "<p><strong>Currently seeking performance venues</strong></p>\n<p>{}</p>",
            escape(profile.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        "<p>Not currently seeking performance venues</p>".to_string()
    };

    let image = profile
        .image_link
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}" width="320">"#,
                escape(src),
                escape(&profile.name)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
{genres}
<p>{city}, {state}</p>
<p>{phone}</p>
{website}
{facebook}
{seeking}
{image}
<p><a class="button" href="/artists/{id}/edit">Edit artist</a></p>
{shows}"#,
        name = escape(&profile.name),
        id = artist.id,
        genres = genre_badges(&profile.genres),
        city = escape(&profile.city),
        state = escape(&profile.state),
        phone = escape(profile.phone.as_deref().unwrap_or("No phone listed")),
        website = external_link("Website", profile.website_link.as_deref()),
        facebook = external_link("Facebook", profile.facebook_link.as_deref()),
        seeking = seeking,
        image = image,
        shows = partitioned_sections(&detail.shows, "/venues"),
    );

    layout(&profile.name, notice, &body)
}
