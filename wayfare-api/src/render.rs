//! Server-side HTML for the planner page.
//!
//! Every page is rebuilt from the submitted form and the outcome of that one
//! submission; nothing carries over between requests.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};
use wayfare_core::{FlightInfo, HotelInfo, PlannerForm, SearchMode, SearchResult};
use crate::itinerary::{download_href, ITINERARY_FILENAME};

pub const PAGE_TITLE: &str = "✈️ AI-Powered Travel Planner";
pub const FLIGHT_COLUMNS: usize = 2;
pub const HOTEL_COLUMNS: usize = 3;

/// What happened to a single form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Required input missing; nothing was dispatched.
    Invalid(String),
    /// The backend call raised; no result to show.
    Failed(String),
    Found { mode: SearchMode, result: SearchResult },
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_web_url(link: &str) -> bool {
    let lower = link.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Only http(s) links are rendered as clickable.
fn safe_href(link: &str) -> Option<String> {
    is_web_url(link).then(|| escape(link.trim()))
}

/// CommonMark to HTML for model-written text. Raw HTML in the source is
/// shown as text, and links or images outside http(s) lose their target.
pub fn markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) if !is_web_url(&dest_url) => {
            Event::Start(Tag::Link { link_type, dest_url: CowStr::Borrowed(""), title, id })
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) if !is_web_url(&dest_url) => {
            Event::Start(Tag::Image { link_type, dest_url: CowStr::Borrowed(""), title, id })
        }
        other => other,
    });

    let mut html = String::with_capacity(text.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events);
    html
}

/// Round-robin split: item `i` lands in column `i % n`.
pub fn columns<T>(items: &[T], n: usize) -> Vec<Vec<&T>> {
    let n = n.max(1);
    let mut cols: Vec<Vec<&T>> = (0..n).map(|_| Vec::new()).collect();
    for (i, item) in items.iter().enumerate() {
        cols[i % n].push(item);
    }
    cols
}

pub fn tab_labels(mode: SearchMode) -> &'static [&'static str] {
    match mode {
        SearchMode::FlightsOnly => &["✈️ Flights", "🏆 AI Recommendation"],
        SearchMode::HotelsOnly => &["🏨 Hotels", "🏆 AI Recommendation"],
        SearchMode::Complete => &["✈️ Flights", "🏨 Hotels", "🏆 AI Recommendations", "📅 Itinerary"],
    }
}

// ============================================================================
// Cards & Tabs
// ============================================================================

fn flight_card(flight: &FlightInfo) -> String {
    format!(
        r#"<div class="card">
<strong>{airline}</strong><br>
💰 <strong>${price}</strong> | ⏱️ {duration} | {stops}<br>
🛫 {departure}<br>
🛬 {arrival}
</div>"#,
        airline = escape(&flight.airline),
        price = escape(&flight.price),
        duration = escape(&flight.duration),
        stops = escape(&flight.stops),
        departure = escape(&flight.departure),
        arrival = escape(&flight.arrival),
    )
}

fn hotel_card(hotel: &HotelInfo) -> String {
    let deal = match safe_href(&hotel.link) {
        Some(href) => format!(
            r#"<a class="button" href="{}" target="_blank" rel="noopener noreferrer">View Deal</a>"#,
            href
        ),
        None => String::new(),
    };
    format!(
        r#"<div class="card">
<strong>{name}</strong><br>
💰 {price} | ⭐ {rating}<br>
📍 {location}<br>
{deal}
</div>"#,
        name = escape(&hotel.name),
        price = escape(&hotel.price),
        rating = escape(&hotel.rating),
        location = escape(&hotel.location),
        deal = deal,
    )
}

fn card_grid<T>(items: &[T], n: usize, card: fn(&T) -> String) -> String {
    let mut html = format!(r#"<div class="grid cols-{}">"#, n);
    for col in columns(items, n) {
        html.push_str(r#"<div class="column">"#);
        for item in col {
            html.push_str(&card(item));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

fn flights_panel(result: &SearchResult) -> String {
    let mut html = format!("<h3>Flight Options ({})</h3>", result.flights.len());
    if result.flights.is_empty() {
        html.push_str(r#"<div class="info">No flights found.</div>"#);
    } else {
        html.push_str(&card_grid(&result.flights, FLIGHT_COLUMNS, flight_card));
    }
    html
}

fn hotels_panel(result: &SearchResult) -> String {
    let mut html = format!("<h3>Hotel Options ({})</h3>", result.hotels.len());
    if result.hotels.is_empty() {
        html.push_str(r#"<div class="info">No hotels found.</div>"#);
    } else {
        html.push_str(&card_grid(&result.hotels, HOTEL_COLUMNS, hotel_card));
    }
    html
}

fn analysis(title: &str, text: &str) -> String {
    format!(
        r#"<details class="expander" open><summary>{}</summary><div class="markdown">{}</div></details>"#,
        title,
        markdown(text)
    )
}

fn recommendations_panel(mode: SearchMode, result: &SearchResult) -> String {
    let mut html = String::new();
    if mode.includes_flights() {
        html.push_str(&analysis("✈️ AI Flight Analysis", &result.ai_flight_recommendation));
    }
    if mode.includes_hotels() {
        html.push_str(&analysis("🏨 AI Hotel Analysis", &result.ai_hotel_recommendation));
    }
    html
}

fn itinerary_panel(result: &SearchResult) -> String {
    let mut html = String::from("<h3>📅 Your AI-Generated Itinerary</h3>");
    match result.itinerary.as_deref() {
        Some(itinerary) if !itinerary.trim().is_empty() => {
            html.push_str(&format!(
                r#"<div class="markdown">{text}</div>
<a class="button" download="{file}" href="{href}">📥 Download Itinerary</a>"#,
                text = markdown(itinerary),
                file = ITINERARY_FILENAME,
                href = download_href(itinerary),
            ));
        }
        _ => html.push_str(r#"<div class="info">No itinerary generated.</div>"#),
    }
    html
}

/// Tabbed result view. Panels line up with `tab_labels(mode)`.
pub fn results(mode: SearchMode, result: &SearchResult) -> String {
    let panels: Vec<String> = match mode {
        SearchMode::FlightsOnly => vec![flights_panel(result), recommendations_panel(mode, result)],
        SearchMode::HotelsOnly => vec![hotels_panel(result), recommendations_panel(mode, result)],
        SearchMode::Complete => vec![
            flights_panel(result),
            hotels_panel(result),
            recommendations_panel(mode, result),
            itinerary_panel(result),
        ],
    };

    let mut html = String::from(r#"<section class="tabs">"#);
    for (i, label) in tab_labels(mode).iter().enumerate() {
        html.push_str(&format!(
            r#"<input type="radio" name="tab" id="tab-{i}"{checked}><label for="tab-{i}">{label}</label>"#,
            i = i,
            checked = if i == 0 { " checked" } else { "" },
            label = label,
        ));
    }
    for (i, panel) in panels.iter().enumerate() {
        html.push_str(&format!(r#"<div class="panel" id="panel-{}">{}</div>"#, i, panel));
    }
    html.push_str("</section>");
    html
}

// ============================================================================
// Page
// ============================================================================

fn mode_options(selected: SearchMode) -> String {
    SearchMode::ALL
        .iter()
        .map(|mode| {
            format!(
                r#"<label class="radio"><input type="radio" name="mode" value="{v}"{c}> {v}</label>"#,
                v = escape(mode.label()),
                c = if *mode == selected { " checked" } else { "" },
            )
        })
        .collect()
}

fn text_input(label: &str, name: &str, value: &str) -> String {
    format!(
        r#"<label>{label}<input type="text" name="{name}" value="{value}"></label>"#,
        label = label,
        name = name,
        value = escape(value),
    )
}

fn date_input(label: &str, name: &str, value: &str) -> String {
    format!(
        r#"<label>{label}<input type="date" name="{name}" value="{value}"></label>"#,
        label = label,
        name = name,
        value = escape(value),
    )
}

fn form(form: &PlannerForm) -> String {
    let location_note = if form.use_flight_destination {
        format!(
            r#"<div class="info">Using flight destination ({}) for hotel search</div>"#,
            escape(&form.destination)
        )
    } else {
        String::new()
    };

    format!(
        r#"<form id="planner" method="post" action="/search" onsubmit="document.getElementById('spinner').hidden = false;">
<aside class="sidebar">
<h2>⚙️ Options</h2>
<fieldset><legend>Search Mode</legend>{modes}</fieldset>
<hr>
<p class="caption">AI-Powered Travel Planner v{version}</p>
</aside>
<div class="columns">
<div class="col">
<h3>🛫 Flight Details</h3>
{origin}
{destination}
{outbound}
{return_date}
</div>
<div class="col">
<h3>🏨 Hotel Details</h3>
<label class="checkbox"><input type="checkbox" name="use_flight_destination" value="on"{toggle}> Use flight destination for hotel</label>
{location_note}
{hotel_location}
{check_in}
{check_out}
</div>
</div>
<div class="submit"><button type="submit">🔍 Search</button></div>
</form>
<div id="spinner" class="spinner" hidden>🤖 AI Agents are planning your trip... (Searching Flights, Hotels &amp; Generating Itinerary)</div>"#,
        modes = mode_options(form.mode),
        version = env!("CARGO_PKG_VERSION"),
        origin = text_input("Departure Airport (IATA code)", "origin", &form.origin),
        destination = text_input("Arrival Airport (IATA code)", "destination", &form.destination),
        outbound = date_input("Departure Date", "outbound_date", &form.outbound_date),
        return_date = date_input("Return Date", "return_date", &form.return_date),
        toggle = if form.use_flight_destination { " checked" } else { "" },
        location_note = location_note,
        hotel_location = text_input("Hotel Location", "hotel_location", &form.hotel_location),
        check_in = date_input("Check-In Date", "check_in_date", &form.check_in_date),
        check_out = date_input("Check-Out Date", "check_out_date", &form.check_out_date),
    )
}

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; color: #1f2328; }
main { max-width: 1200px; margin: 24px auto; padding: 0 20px; }
.sidebar { float: right; width: 260px; margin-left: 24px; padding: 12px; background: #f6f8fa; border-radius: 8px; }
.columns, .grid { display: flex; gap: 16px; }
.col, .column { flex: 1; display: flex; flex-direction: column; gap: 8px; }
label { display: block; margin-bottom: 8px; }
input[type=text], input[type=date] { display: block; width: 100%; padding: 6px; box-sizing: border-box; }
.card { border: 1px solid #d0d7de; border-radius: 8px; padding: 12px; }
.info { background: #ddf4ff; border-radius: 6px; padding: 10px; margin: 8px 0; }
.error { background: #ffebe9; border-radius: 6px; padding: 10px; margin: 8px 0; color: #82071e; }
.spinner { margin: 16px 0; font-weight: 600; }
.caption { color: #656d76; font-size: 0.85em; }
.button { display: inline-block; margin-top: 6px; padding: 4px 10px; border: 1px solid #d0d7de; border-radius: 6px; text-decoration: none; }
.markdown table { border-collapse: collapse; }
.markdown th, .markdown td { border: 1px solid #d0d7de; padding: 4px 8px; }
.tabs { clear: both; margin-top: 24px; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: 8px 14px; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #fd8c73; font-weight: 600; }
.tabs .panel { display: none; padding-top: 12px; }
#tab-0:checked ~ #panel-0, #tab-1:checked ~ #panel-1, #tab-2:checked ~ #panel-2, #tab-3:checked ~ #panel-3 { display: block; }
"#;

pub fn page(planner: &PlannerForm, outcome: Option<&SearchOutcome>) -> String {
    let body = match outcome {
        None => String::new(),
        Some(SearchOutcome::Invalid(msg)) | Some(SearchOutcome::Failed(msg)) => {
            format!(r#"<div class="error">{}</div>"#, escape(msg))
        }
        Some(SearchOutcome::Found { mode, result }) => results(*mode, result),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<main>
<h1>{title}</h1>
<p><strong>Find flights, hotels, and get personalized recommendations with AI! Create your perfect travel itinerary in seconds.</strong></p>
{form}
{body}
</main>
</body>
</html>"#,
        title = PAGE_TITLE,
        style = STYLE,
        form = form(planner),
        body = body,
    )
}
