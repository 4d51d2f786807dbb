//! Icon hint mapping for project cards.
//!
//! The keyword table and fallback set are fixed, immutable data owned by
//! this module; lookups never fail. Which glyph comes back has no health
//! or correctness meaning.

/// Keyword to glyph mapping, matched case-insensitively.
pub static ICON_KEYWORDS: &[(&str, &str)] = &[
    // Portfolio & personal
    ("cv", "📄"),
    ("portfolio", "🌐"),
    ("personal", "👤"),
    ("resume", "📋"),
    // E-commerce & business
    ("shop", "🛒"),
    ("store", "🏪"),
    ("ecommerce", "🛍️"),
    ("business", "💼"),
    ("marketplace", "🏬"),
    // Mobile & apps
    ("app", "📱"),
    ("mobile", "📱"),
    ("ios", "🍎"),
    ("android", "🤖"),
    ("game", "🎮"),
    // Web & development
    ("website", "🌐"),
    ("web", "🌐"),
    ("frontend", "🎨"),
    ("backend", "⚙️"),
    ("api", "🔌"),
    ("tool", "🔧"),
    ("library", "📚"),
    ("framework", "🏗️"),
    // Data & analytics
    ("dashboard", "📊"),
    ("analytics", "📈"),
    ("data", "💾"),
    ("chart", "📊"),
    ("metrics", "📊"),
    ("reporting", "📋"),
    // Content & CMS
    ("cms", "📝"),
    ("blog", "✍️"),
    ("content", "📄"),
    ("editor", "✏️"),
    ("publishing", "📰"),
    // Social & communication
    ("social", "👥"),
    ("chat", "💬"),
    ("messaging", "💌"),
    ("forum", "💭"),
    ("community", "🏘️"),
    // Security & authentication
    ("security", "🔐"),
    ("auth", "🔑"),
    ("login", "🚪"),
    ("encryption", "🔒"),
    // Cloud & infrastructure
    ("cloud", "☁️"),
    ("saas", "🚀"),
    ("server", "🖥️"),
    ("deployment", "🚀"),
    ("hosting", "🏠"),
    // AI & machine learning
    ("ai", "🤖"),
    ("ml", "🧠"),
    ("machine learning", "🧠"),
    ("neural", "🧠"),
    // Other common types
    ("weather", "🌤️"),
    ("calendar", "📅"),
    ("todo", "✅"),
    ("task", "📋"),
    ("project", "📁"),
    ("file", "📄"),
    ("search", "🔍"),
    ("filter", "🔍"),
    ("form", "📝"),
    ("survey", "📊"),
    ("quiz", "❓"),
    ("test", "🧪"),
    ("demo", "🎬"),
    ("prototype", "🔬"),
    ("beta", "🧪"),
];

/// Fallback glyphs for hints the table does not resolve.
pub static FALLBACK_ICONS: &[&str] = &[
    "🚀", "💻", "🌐", "📱", "⚡", "🔧", "🎨", "📊", "🔐", "📈",
];

/// Resolve an icon hint to a glyph.
///
/// Exact keyword match wins, then a substring match in either direction;
/// anything else falls back to [`fallback_icon`]. Always returns a glyph.
pub fn icon_for(hint: &str) -> &'static str {
    let needle = hint.trim().to_lowercase();
    if needle.is_empty() {
        return fallback_icon(hint);
    }

    for (keyword, glyph) in ICON_KEYWORDS {
        if *keyword == needle {
            return glyph;
        }
    }

    for (keyword, glyph) in ICON_KEYWORDS {
        if needle.contains(keyword) || keyword.contains(&needle) {
            return glyph;
        }
    }

    fallback_icon(&needle)
}

/// Pick a deterministic fallback glyph for a seed string.
///
/// Stable across runs so project cards keep their icon between reloads.
pub fn fallback_icon(seed: &str) -> &'static str {
    let mut hash: usize = 0;
    for byte in seed.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(byte as usize);
    }
    FALLBACK_ICONS[hash % FALLBACK_ICONS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(icon_for("cv"), "📄");
        assert_eq!(icon_for("dashboard"), "📊");
        assert_eq!(icon_for("game"), "🎮");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(icon_for("CV"), "📄");
        assert_eq!(icon_for("  Dashboard  "), "📊");
    }

    #[test]
    fn test_substring_match_in_hint() {
        // Hint contains a keyword
        assert_eq!(icon_for("my weather station"), "🌤️");
    }

    #[test]
    fn test_substring_match_in_keyword() {
        // Keyword contains the hint
        assert_eq!(icon_for("ecommerc"), "🛍️");
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let first = icon_for("zzz-unmapped-hint");
        let second = icon_for("zzz-unmapped-hint");
        assert_eq!(first, second);
        assert!(FALLBACK_ICONS.contains(&first));
    }

    #[test]
    fn test_always_returns_some_icon() {
        for hint in ["", "   ", "zzzzz", "日本語", "1234"] {
            assert!(!icon_for(hint).is_empty());
        }
    }
}
