use crate::types::AircraftRecord;

static TAG_REGEX: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"<[^>]*>").unwrap());
static LINE_BREAK_REGEX: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Popup body for an aircraft marker.
#[must_use]
pub fn popup_html(aircraft: &AircraftRecord) -> String {
    format!(
        "<strong>Flight: {0}</strong><br>Altitude: {1} ft<br>Speed: {2} km/h<br>Heading: {3}",
        escape_html(&aircraft.callsign),
        format_thousands(aircraft.altitude),
        aircraft.speed_kmh,
        aircraft.heading,
    )
}

/// Formats an integer with comma thousands separators, e.g. `35,000`.
#[must_use]
pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

/// Escapes text so it is shown literally inside popup HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape_html(text: &str) -> String {
    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Plain-text lines of a popup, for surfaces that cannot render HTML.
#[must_use]
pub fn html_to_lines(html: &str) -> Vec<String> {
    LINE_BREAK_REGEX
        .split(html)
        .map(|line| unescape_html(TAG_REGEX.replace_all(line, "").trim()))
        .filter(|line| !line.is_empty())
        .collect()
}
