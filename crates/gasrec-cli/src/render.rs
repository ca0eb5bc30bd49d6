//! Plain-text rendering of presentations, map state, and backend config.

use std::fmt::Write as _;
use std::sync::LazyLock;

use gasrec_client::BackendConfig;
use gasrec_core::format::{format_currency, format_distance, format_rating, format_travel_time};
use gasrec_core::{AppConfig, ListView, MapState, MarkerKind, StationCard};
use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));

static TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|[\s\-:|]+\|\s*$").expect("valid separator regex"));

pub(crate) fn render_list(list: &ListView) -> String {
    match list {
        ListView::Empty { message } => format!("{message}\n"),
        ListView::Stations { cards } => cards
            .iter()
            .map(render_card)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_card(card: &StationCard) -> String {
    let mut out = String::new();

    let mut heading = format!("#{:<3}{}", card.rank, card.name);
    if card.recommended_badge {
        heading.push_str("  [RECOMMENDED]");
    }
    if card.ai_recommended {
        heading.push_str("  (AI pick)");
    }
    let _ = writeln!(out, "{heading}");

    if let Some(address) = &card.address {
        let _ = writeln!(out, "    {address}");
    }
    let _ = writeln!(
        out,
        "    {} away, {} travel time",
        format_distance(card.distance_miles),
        format_travel_time(card.travel_time_minutes)
    );
    if let Some(brand) = &card.brand {
        let _ = writeln!(out, "    Brand: {brand}");
    }
    if let Some(rating) = card.rating {
        let _ = writeln!(out, "    Rating: {}", format_rating(rating));
    }
    let _ = writeln!(
        out,
        "    Price ({}): {}/gal",
        card.fuel_grade,
        format_currency(card.price_per_gallon)
    );
    let _ = writeln!(
        out,
        "    Fuel: {}  Travel: {}  Total: {}",
        format_currency(card.fuel_cost),
        format_currency(card.travel_cost),
        format_currency(card.total_cost)
    );
    if let Some(grades) = card.grade_prices {
        let listed: Vec<String> = grades
            .iter()
            .map(|(grade, price)| format!("{grade}: {}", format_currency(*price)))
            .collect();
        let _ = writeln!(out, "    {}", listed.join("  "));
    }
    out
}

/// Viewport line followed by one line per marker.
pub(crate) fn render_map(map: &MapState) -> String {
    let mut out = String::new();
    match map.viewport() {
        Some(v) => {
            let _ = writeln!(out, "Map: centered on {} at zoom {}", v.center, v.zoom);
        }
        None => {
            let _ = writeln!(out, "Map: no location to show");
        }
    }

    for marker in map.markers() {
        let line = match marker.kind {
            MarkerKind::User => format!("  [you] {} ({})", marker.title, marker.position),
            MarkerKind::Station { rank, emphasized } => format!(
                "  [{rank:>2}]{} {} at {}",
                if emphasized { "*" } else { " " },
                marker.title,
                marker.position
            ),
        };
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Render analysis markdown for a terminal.
///
/// Emphasis markers are stripped, table separator rows are dropped, and
/// each run of table rows is laid out in aligned columns.
pub(crate) fn render_analysis(text: &str) -> String {
    let mut out = String::new();
    let mut table: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        if line.contains('|') && !line.trim().is_empty() {
            if TABLE_SEPARATOR.is_match(line) {
                continue;
            }
            table.push(
                line.split('|')
                    .map(|cell| strip_emphasis(cell.trim()))
                    .filter(|cell| !cell.is_empty())
                    .collect(),
            );
            continue;
        }
        flush_table(&mut out, &mut table);
        let _ = writeln!(out, "{}", strip_emphasis(line));
    }
    flush_table(&mut out, &mut table);
    out
}

fn strip_emphasis(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    ITALIC.replace_all(&text, "$1").into_owned()
}

fn flush_table(out: &mut String, rows: &mut Vec<Vec<String>>) {
    if rows.is_empty() {
        return;
    }
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in rows.drain(..) {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
}

fn availability(flag: bool) -> &'static str {
    if flag {
        "Available"
    } else {
        "Not configured"
    }
}

pub(crate) fn render_backend_config(backend: &BackendConfig, config: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Backend: {}", config.backend_url);
    let _ = writeln!(out, "Environment: {}", config.env);
    let _ = writeln!(out);
    let _ = writeln!(out, "Defaults:");
    let _ = writeln!(out, "  MPG:            {:.1}", backend.default_mpg);
    let _ = writeln!(out, "  Tank size:      {:.1} gallons", backend.default_tank_size);
    let _ = writeln!(out, "  Search radius:  {:.1} miles", backend.default_radius);
    if let Some(max) = backend.max_travel_time {
        let _ = writeln!(out, "  Max travel:     {max} min");
    }
    let _ = writeln!(out, "  Fuel grade:     {}", config.default_fuel_grade);
    let _ = writeln!(out);
    let _ = writeln!(out, "API Status:");
    let _ = writeln!(
        out,
        "  Google Maps API: {}",
        availability(backend.has_google_maps)
    );
    let _ = writeln!(out, "  Claude.ai: {}", availability(backend.has_claude));
    let _ = writeln!(out, "  ChatGPT: {}", availability(backend.has_openai));
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
