pub const PLACEHOLDER_WIDTH: u32 = 100;
pub const PLACEHOLDER_HEIGHT: u32 = 100;

/// A grey 100x100 SVG with `label` centered in it. The pixels of the source are never looked at.
pub fn placeholder_svg(label: &str) -> String {
    format!(
        r##"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">
    <rect width="100%" height="100%" fill="#f0f0f0"/>
    <text x="50%" y="50%" font-family="Arial" font-size="14" text-anchor="middle" dominant-baseline="middle">{label}</text>
  </svg>"##,
        width = PLACEHOLDER_WIDTH,
        height = PLACEHOLDER_HEIGHT,
        label = escape_xml_text(label),
    )
}

fn escape_xml_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            character => escaped.push(character),
        }
    }
    escaped
}
