//! Tag-name validation
//!
//! Fixed ASCII-class grammar shared by narrow and wide string forms: no
//! normalization, no Unicode tables.

fn is_valid_name_units(mut units: impl Iterator<Item = u32>) -> bool {
    let Some(first) = units.next() else {
        return false;
    };
    let start_ok = matches!(first, 0x41..=0x5A | 0x61..=0x7A) // A-Z a-z
        || first == u32::from(b':')
        || first == u32::from(b'_');
    if !start_ok {
        return false;
    }

    units.all(|c| {
        matches!(c, 0x30..=0x39 | 0x41..=0x5A | 0x61..=0x7A)
            || c == u32::from(b':')
            || c == u32::from(b'_')
            || c == u32::from(b'-')
            || c == u32::from(b'.')
    })
}

/// Check a tag/attribute name against the grammar: first character an
/// ASCII letter, `:`, or `_`; every following character ASCII
/// alphanumeric, `:`, `_`, `-`, or `.`. Empty names are invalid.
///
/// Pure and reentrant. The narrow byte form is examined when the string
/// is all-ASCII; otherwise the check runs over UTF-16 code units, with
/// the same grammar either way.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    if name.is_ascii() {
        return is_valid_name_units(name.bytes().map(u32::from));
    }

    is_valid_name_units(name.encode_utf16().map(u32::from))
}
