//! Player name normalization.
//!
//! The same player must come out identical across games, so display names
//! are folded to plain ASCII-ish text: `Nikola Jokić` becomes `Nikola Jokic`.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize a player's display name.
pub fn normalize_name(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());

    for ch in raw.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        match ch {
            // Letters with no canonical decomposition
            'đ' => folded.push('d'),
            'Đ' => folded.push('D'),
            'ł' => folded.push('l'),
            'Ł' => folded.push('L'),
            'ø' => folded.push('o'),
            'Ø' => folded.push('O'),
            'ı' => folded.push('i'),
            'ß' => folded.push_str("ss"),
            'æ' => folded.push_str("ae"),
            'Æ' => folded.push_str("AE"),
            // Punctuation variants
            '\u{2018}' | '\u{2019}' | '\u{02BC}' | '`' => folded.push('\''),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => folded.push('-'),
            // Footnote markers the site appends to some names
            '*' => {}
            c if c.is_whitespace() => folded.push(' '),
            c => folded.push(c),
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
