/// Display shortening for long file names.
///
/// Both functions count `char`s, not bytes, so multi-byte names are never
/// split inside a code point.

const ELLIPSIS: &str = "...";

/// Shorten `s` to at most `limit` chars by replacing its middle with `...`.
///
/// Limits below 5 leave no room for a useful ellipsis and simply keep the
/// first `limit` chars.
pub fn truncate_middle(s: &str, limit: usize) -> String {
    let len = s.chars().count();
    if len <= limit {
        return s.to_owned();
    }
    if limit < 5 {
        return s.chars().take(limit).collect();
    }

    let content = limit - ELLIPSIS.len();
    let head = match content {
        0..=4 => 1,
        5..=6 => content / 2,
        _ => 3,
    };
    let tail = content - head;

    let mut out = String::with_capacity(limit + 8);
    out.extend(s.chars().take(head));
    out.push_str(ELLIPSIS);
    out.extend(s.chars().skip(len - tail));
    out
}

/// Shorten a file name to `limit` chars, keeping a short extension intact.
///
/// Extensions (including the dot) of up to 5 bytes are preserved and the
/// stem is middle-truncated. Longer or absent extensions fall back to
/// [`truncate_middle`] on the whole name.
pub fn shorten_filename(name: &str, limit: usize) -> String {
    if name.is_empty() || limit == 0 {
        return String::new();
    }
    if name.chars().count() <= limit {
        return name.to_owned();
    }

    let split = name
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < name.len() - 1 && name.len() - pos <= 5);

    let Some(pos) = split else {
        return truncate_middle(name, limit);
    };

    let (stem, ext) = name.split_at(pos);
    let ext_len = ext.chars().count();
    if ext_len >= limit {
        return truncate_middle(name, limit);
    }

    let mut out = truncate_middle(stem, limit - ext_len);
    out.push_str(ext);
    out
}
