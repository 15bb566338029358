use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn avatar_url(base: &str, handle: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), handle)
}

pub fn profile_url(base: &str, handle: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), handle)
}

fn escape_xml(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Circle with the handle's first letter, as an inline SVG data URL.
pub fn fallback_avatar(handle: &str) -> String {
    let letter: String = handle
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();
    let svg = format!(
        concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 48 48">"##,
            r##"<rect width="48" height="48" rx="24" fill="#eceae4"/>"##,
            r##"<text x="24" y="24" text-anchor="middle" dominant-baseline="central" "##,
            r##"font-family="Inter, sans-serif" font-size="18" font-weight="500" fill="#555">{}</text>"##,
            r##"</svg>"##,
        ),
        escape_xml(&letter)
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}
