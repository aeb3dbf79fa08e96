//! Shared glyph normalization for shorthand text and formulas
//!
//! Shorthand is typed on shop-floor terminals where the input method often
//! produces full-width punctuation and assorted diameter glyphs. Both the
//! format codec and the formula evaluator normalize their input through
//! this module before matching.

/// Fold one full-width or variant character to its ASCII form.
///
/// Returns `None` for characters that pass through unchanged.
fn fold_char(c: char) -> Option<char> {
    match c {
        '０'..='９' => char::from_u32('0' as u32 + (c as u32 - '０' as u32)),
        '．' => Some('.'),
        '＊' | '×' => Some('*'),
        '－' | '−' | '–' | '—' => Some('-'),
        '＋' => Some('+'),
        '÷' | '／' => Some('/'),
        '（' => Some('('),
        '）' => Some(')'),
        'Φ' | 'ϕ' | '⌀' | 'Ø' | 'ø' | 'Ф' => Some('φ'),
        _ => None,
    }
}

/// Normalize shorthand measurement text before grammar matching.
///
/// Folds full-width digits and punctuation, unifies diameter glyphs to `φ`,
/// and strips all whitespace (workers space separators inconsistently).
pub fn normalize_notation(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| fold_char(c).unwrap_or(c))
        .collect()
}

/// Normalize a volume formula before evaluation.
///
/// Folds full-width operators and digits, rewrites the superscript square
/// marker to `**2`, maps the pi symbol to the evaluator's `pi` constant,
/// and drops stray diameter glyphs copied in from shorthand hints.
pub fn normalize_formula(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len());
    for c in formula.chars() {
        let c = fold_char(c).unwrap_or(c);
        match c {
            '²' => out.push_str("**2"),
            'π' => out.push_str("pi"),
            'φ' => {}
            _ => out.push(c),
        }
    }
    out
}
