//! Show listing page and the show sections of detail pages

use fyyur_common::listing::{Partitioned, ShowEntry, ShowListing};
use fyyur_common::time::{format_datetime, DisplayFormat};

use super::{escape, layout, Notice};

pub fn shows_page(shows: &[ShowListing], notice: Option<&Notice>) -> String {
    let mut body = String::from("<h1>Shows</h1>\n");

    if shows.is_empty() {
        body.push_str("<p>No shows listed yet.</p>\n");
    }

    for show in shows {
        body.push_str(&format!(
            r#"<div class="show-card">
    {image}
    <h4><a href="/artists/{artist_id}">{artist_name}</a></h4>
    <p>playing at <a href="/venues/{venue_id}">{venue_name}</a></p>
    <p><time datetime="{start_time}">{display}</time></p>
</div>
"#,
            image = image_tag(show.artist_image_link.as_deref(), &show.artist_name),
            artist_id = show.artist_id,
            artist_name = escape(&show.artist_name),
            venue_id = show.venue_id,
            venue_name = escape(&show.venue_name),
            start_time = escape(&show.start_time),
            display = escape(&format_datetime(&show.starts_at, DisplayFormat::Full)),
        ));
    }

    layout("Shows", notice, &body)
}

/// Past and upcoming sections of a venue or artist page
///
/// `link_prefix` is where the counterpart lives (`/artists` on a venue page).
pub(crate) fn partitioned_sections(shows: &Partitioned<ShowEntry>, link_prefix: &str) -> String {
    format!(
        "{}\n{}",
        entries_section(
            &format!("{} Upcoming Show(s)", shows.upcoming_count()),
            &shows.upcoming,
            link_prefix
        ),
        entries_section(
            &format!("{} Past Show(s)", shows.past_count()),
            &shows.past,
            link_prefix
        ),
    )
}

fn entries_section(heading: &str, entries: &[ShowEntry], link_prefix: &str) -> String {
    let cards: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                r#"<div class="show-card">
    {image}
    <h5><a href="{prefix}/{id}">{name}</a></h5>
    <p><time datetime="{start_time}">{display}</time></p>
</div>"#,
                image = image_tag(entry.counterpart_image_link.as_deref(), &entry.counterpart_name),
                prefix = link_prefix,
                id = entry.counterpart_id,
                name = escape(&entry.counterpart_name),
                start_time = escape(&entry.start_time),
                display = escape(&format_datetime(&entry.starts_at, DisplayFormat::Medium)),
            )
        })
        .collect();

    format!(
        "<section>\n<h2>{}</h2>\n{}\n</section>",
        escape(heading),
        cards.join("\n")
    )
}

fn image_tag(src: Option<&str>, alt: &str) -> String {
    match src {
        Some(src) => format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(alt)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(name: &str) -> ShowEntry {
        let starts_at = NaiveDate::from_ymd_opt(2019, 5, 21)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap();
        ShowEntry {
            show_id: 1,
            counterpart_id: 4,
            counterpart_name: name.to_string(),
            counterpart_image_link: None,
            start_time: "2019-05-21 21:30:00".to_string(),
            starts_at,
        }
    }

    #[test]
    fn test_sections_show_counts_and_links() {
        let shows = Partitioned {
            past: vec![entry("Guns N Petals")],
            upcoming: vec![],
        };

        let html = partitioned_sections(&shows, "/artists");

        assert!(html.contains("0 Upcoming Show(s)"));
        assert!(html.contains("1 Past Show(s)"));
        assert!(html.contains(r#"<a href="/artists/4">Guns N Petals</a>"#));
        assert!(html.contains("Tue 05, 21, 2019 9:30PM"));
    }
}
