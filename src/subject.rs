//! Fixed subject table.
//!
//! The table is closed: it is both the category→color lookup used when
//! generating instances and the category set reported by progress
//! aggregation. Order matters for reporting.

/// Label whose color doubles as the fallback for unknown categories.
pub const UNCATEGORIZED: &str = "その他";

pub const SUBJECT_COLORS: [(&str, &str); 10] = [
    ("国語", "#f44336"),
    ("数1", "#2196f3"),
    ("数A", "#1e88e5"),
    ("EC1", "#64b5f6"),
    ("論理表現1", "#4caf50"),
    ("物理", "#ff9800"),
    ("化学", "#ffb74d"),
    ("生物", "#81c784"),
    ("歴史総合", "#9c27b0"),
    (UNCATEGORIZED, "#9e9e9e"),
];

const FALLBACK_COLOR: &str = "#9e9e9e";

/// Subject labels in table order.
pub fn subjects() -> impl Iterator<Item = &'static str> {
    SUBJECT_COLORS.iter().map(|(subject, _)| *subject)
}

pub fn is_known_subject(category: &str) -> bool {
    SUBJECT_COLORS.iter().any(|(subject, _)| *subject == category)
}

/// Color token for `category`, or the uncategorized color when the label is
/// not in the table.
pub fn color_for(category: &str) -> &'static str {
    SUBJECT_COLORS
        .iter()
        .find(|(subject, _)| *subject == category)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}
