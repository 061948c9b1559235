use std::path::Path;

use deunicode::deunicode;

use crate::media::MediaKind;

/// Builds the renamed file name for an audio file:
/// `"{artists} - {stem} - {sku}{ext}"`, blank parts dropped, transliterated to
/// ASCII. With `slugify` every char outside `[a-zA-Z0-9-]` before the
/// extension becomes `-`. Images keep their name.
pub fn modify_name(name: &str, artists: &str, sku: &str, slugify: bool) -> String {
    if MediaKind::from_name(name) == Some(MediaKind::Image) {
        return name.to_string();
    }

    let ext = extension(name);
    let stem = &name[..name.len() - ext.len()];

    let joined = [artists, stem, sku]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" - ");
    let mut base = deunicode(&joined);

    if slugify {
        base = slug(&base);
    }

    base + ext
}

/// Extension with its leading dot, or "" when there is none.
fn extension(name: &str) -> &str {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some(ext) => &name[name.len() - ext.len() - 1..],
        None => "",
    }
}

fn slug(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}
