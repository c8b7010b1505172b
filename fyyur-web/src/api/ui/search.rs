//! Search results page shared by venues and artists

use fyyur_common::db::Party;
use fyyur_common::listing::SearchResults;

use super::{escape, layout, search_box};

pub fn search_results_page(party: Party, term: &str, results: &SearchResults) -> String {
    let (action, base) = match party {
        Party::Venue => ("/venues/search", "/venues"),
        Party::Artist => ("/artists/search", "/artists"),
    };

    let items: Vec<String> = results
        .data
        .iter()
        .map(|hit| {
            format!(
                r#"<li><a href="{}/{}">{}</a> <small>{} upcoming show(s)</small></li>"#,
                base,
                hit.id,
                escape(&hit.name),
                hit.num_upcoming_shows
            )
        })
        .collect();

    let body = format!(
        "{search}\n<h3>Number of search results for \"{term}\": {count}</h3>\n<ul class=\"item-list\">\n{items}\n</ul>",
        search = search_box(action, "Search again", term),
        term = escape(term),
        count = results.count,
        items = items.join("\n"),
    );

    layout(&format!("{} search", party.label()), None, &body)
}
