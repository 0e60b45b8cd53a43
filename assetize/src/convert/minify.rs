use anyhow::Context;
use std::sync::{Arc, OnceLock};

const MAX_PASSES: usize = 10;

/// Normalizes an SVG document through `usvg` and writes it back without indentation, repeating until the output stops
/// shrinking. The root `viewBox` is always kept.
///
/// Text is laid out with the system fonts. A `<text>` element that cannot be laid out would silently vanish from the
/// output, so losing one is an error instead.
pub fn minify_svg(svg: &[u8]) -> anyhow::Result<String> {
    let options = usvg::Options {
        fontdb: system_fonts(),
        ..Default::default()
    };
    let write_options = usvg::WriteOptions {
        indent: usvg::Indent::None,
        attributes_indent: usvg::Indent::None,
        preserve_text: true,
        ..Default::default()
    };

    let text_elements = count_text_elements(svg);

    let tree = usvg::Tree::from_data(svg, &options).context("Failed to parse SVG")?;
    ensure_text_kept(&tree, text_elements)?;
    let size = tree.size();
    let mut minified = tree.to_string(&write_options);

    for _ in 1..MAX_PASSES {
        let tree = usvg::Tree::from_str(&minified, &options).context("Failed to re-parse minified SVG")?;
        ensure_text_kept(&tree, text_elements)?;
        let candidate = tree.to_string(&write_options);

        if candidate.len() >= minified.len() {
            break;
        }
        minified = candidate;
    }

    Ok(ensure_view_box(minified, size.width(), size.height()))
}

/// Loaded once per process; scanning the system font directories is slow.
fn system_fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();

    FONTS
        .get_or_init(|| {
            let mut database = usvg::fontdb::Database::new();
            database.load_system_fonts();
            log::debug!("Loaded {} font faces for SVG text", database.len());
            Arc::new(database)
        })
        .clone()
}

fn ensure_text_kept(tree: &usvg::Tree, text_elements: usize) -> anyhow::Result<()> {
    let text_nodes = count_text_nodes(tree.root());

    if text_nodes < text_elements {
        anyhow::bail!(
            "{} of {} text element(s) could not be laid out (no usable font found)",
            text_elements - text_nodes,
            text_elements
        );
    }

    Ok(())
}

fn count_text_nodes(group: &usvg::Group) -> usize {
    let mut count = 0;
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => count += count_text_nodes(group),
            usvg::Node::Text(_) => count += 1,
            usvg::Node::Path(_) | usvg::Node::Image(_) => {}
        }
    }
    count
}

/// Number of non-empty `<text>` elements in the raw document. `<textPath>` and `<text/>` are not counted.
fn count_text_elements(svg: &[u8]) -> usize {
    const START_TAG: &[u8] = b"<text";

    svg.windows(START_TAG.len() + 1)
        .filter(|window| {
            window.starts_with(START_TAG) && matches!(window[START_TAG.len()], b' ' | b'\t' | b'\r' | b'\n' | b'>')
        })
        .count()
}

/// Inserts `viewBox="0 0 width height"` into the root element if the serializer left it out.
fn ensure_view_box(svg: String, width: f32, height: f32) -> String {
    let Some(start) = svg.find("<svg") else {
        return svg;
    };
    let root_tag_end = svg[start..].find('>').map_or(svg.len(), |end| start + end);

    if svg[start..root_tag_end].contains("viewBox=") {
        return svg;
    }

    let insert_at = start + "<svg".len();
    format!("{} viewBox=\"0 0 {} {}\"{}", &svg[..insert_at], width, height, &svg[insert_at..])
}
