//! Venue listing and detail pages

use fyyur_common::listing::{LocationGroup, VenueDetail};

use super::shows::partitioned_sections;
use super::{escape, external_link, genre_badges, layout, search_box, Notice};

pub fn venues_page(groups: &[LocationGroup], notice: Option<&Notice>) -> String {
    let mut body = String::from("<h1>Venues</h1>\n");
    body.push_str(&search_box("/venues/search", "Find a venue", ""));
    body.push('\n');

    if groups.is_empty() {
        body.push_str("<p>No venues listed yet.</p>\n");
    }

    for group in groups {
        let items: Vec<String> = group
            .venues
            .iter()
            .map(|venue| {
                format!(
                    r#"<li><a href="/venues/{}">{}</a> <small>{} upcoming show(s)</small></li>"#,
                    venue.id,
                    escape(&venue.name),
                    venue.num_upcoming_shows
                )
            })
            .collect();

        body.push_str(&format!(
            "<div class=\"venues-group\">\n<h3>{}, {}</h3>\n<ul class=\"item-list\">\n{}\n</ul>\n</div>\n",
            escape(&group.city),
            escape(&group.state),
            items.join("\n")
        ));
    }

    layout("Venues", notice, &body)
}

pub fn venue_detail_page(detail: &VenueDetail, notice: Option<&Notice>) -> String {
    let venue = &detail.venue;
    let profile = &venue.profile;

    let seeking = if profile.seeking_talent {
        format!(
            "<p><strong>Currently seeking talent</strong></p>\n<p>{}</p>",
            escape(profile.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        "<p>Not currently seeking talent</p>".to_string()
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
<p>{address}<br>{city}, {state}</p>
<p>{phone}</p>
{website}
{facebook}
{seeking}
{image}
<p>
    <a class="button" href="/venues/{id}/edit">Edit venue</a>
    <button class="button" type="button" onclick="deleteVenue()">Delete venue</button>
</p>
{shows}
<script>
function deleteVenue() {{
    if (!confirm("Delete this venue and all of its shows?")) {{ return; }}
    fetch("/venues/{id}", {{ method: "DELETE" }}).then(function () {{
        window.location = "/";
    }});
}}
</script>"#,
        name = escape(&profile.name),
        id = venue.id,
        genres = genre_badges(&profile.genres),
        address = escape(&profile.address),
        city = escape(&profile.city),
        state = escape(&profile.state),
        phone = escape(profile.phone.as_deref().unwrap_or("No phone listed")),
        website = external_link("Website", profile.website_link.as_deref()),
        facebook = external_link("Facebook", profile.facebook_link.as_deref()),
        seeking = seeking,
        image = image,
        shows = partitioned_sections(&detail.shows, "/artists"),
    );

    layout(&profile.name, notice, &body)
}
