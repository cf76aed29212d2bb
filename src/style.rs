//! Frame styles and the resolver seam.
//!
//! The engine never enumerates styles itself; it resolves whatever
//! [`StyleRef`] arrives with a `print` call through a [`StyleResolver`].
//! [`StyleCatalog`] is the default resolver, carrying the built-in paper
//! patterns plus user-registered textures and caption-color overrides.

use std::collections::BTreeMap;

/// Identifier for a user-registered texture style.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CustomStyleId(pub u64);

/// A style reference is either a named built-in or a registered custom
/// texture. Keeping the two cases in the type removes any need to sniff
/// identifier prefixes at resolve time.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum StyleRef {
    Builtin(String),
    Custom(CustomStyleId),
}

impl StyleRef {
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::Builtin(name.into())
    }
}

/// Visual parameters for one card frame: SVG `<defs>` content (patterns
/// and gradients, possibly empty), the fill reference for the frame rect,
/// and the caption text color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedStyle {
    pub defs: String,
    pub fill: String,
    pub caption_color: String,
}

/// Synchronous, side-effect-free style lookup. `uid` namespaces generated
/// defs ids so many cards can share one document.
pub trait StyleResolver {
    fn resolve(&self, style: &StyleRef, uid: &str) -> ResolvedStyle;
}

const DEFAULT_CAPTION_COLOR: &str = "#333333";

/// Built-in styles plus registered textures and per-style caption colors.
#[derive(Clone, Debug, Default)]
pub struct StyleCatalog {
    textures: BTreeMap<CustomStyleId, String>,
    caption_overrides: BTreeMap<StyleRef, String>,
    next_custom: u64,
}

impl StyleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an uploaded texture (an encoded-image href) and return the
    /// style reference that selects it.
    pub fn register_texture(&mut self, href: impl Into<String>) -> StyleRef {
        let id = CustomStyleId(self.next_custom);
        self.next_custom += 1;
        self.textures.insert(id, href.into());
        StyleRef::Custom(id)
    }

    /// Bind a caption color to a style, overriding its default.
    pub fn set_caption_color(&mut self, style: StyleRef, color: impl Into<String>) {
        self.caption_overrides.insert(style, color.into());
    }
}

impl StyleResolver for StyleCatalog {
    fn resolve(&self, style: &StyleRef, uid: &str) -> ResolvedStyle {
        let mut resolved = match style {
            StyleRef::Custom(id) => match self.textures.get(id) {
                Some(href) => texture_style(href, uid),
                // Unregistered custom id: plain white frame, not an error.
                None => plain_white(),
            },
            StyleRef::Builtin(name) => builtin_style(name, uid),
        };
        if let Some(color) = self.caption_overrides.get(style) {
            resolved.caption_color = color.clone();
        }
        resolved
    }
}

fn plain_white() -> ResolvedStyle {
    ResolvedStyle {
        defs: String::new(),
        fill: "#fff".to_string(),
        caption_color: DEFAULT_CAPTION_COLOR.to_string(),
    }
}

fn texture_style(href: &str, uid: &str) -> ResolvedStyle {
    ResolvedStyle {
        defs: format!(
            r##"<pattern id="pat-{uid}" width="100%" height="100%" patternContentUnits="objectBoundingBox">
            <image href="{href}" width="1" height="1" preserveAspectRatio="xMidYMid slice" />
        </pattern>"##
        ),
        fill: format!("url(#pat-{uid})"),
        caption_color: DEFAULT_CAPTION_COLOR.to_string(),
    }
}

/// Unknown built-in names resolve to the plain white frame.
fn builtin_style(name: &str, uid: &str) -> ResolvedStyle {
    let (defs, fill, caption): (String, String, &str) = match name {
        "dots" => (
            format!(
                r##"<pattern id="pat-{uid}" x="0" y="0" width="20" height="20" patternUnits="userSpaceOnUse">
                <rect width="20" height="20" fill="#fff"/>
                <circle cx="10" cy="10" r="2.5" fill="#ff9f43" opacity="0.4"/>
                <circle cx="0" cy="0" r="2.5" fill="#ff9f43" opacity="0.4"/>
            </pattern>"##
            ),
            format!("url(#pat-{uid})"),
            "#333333",
        ),
        "grid" => (
            format!(
                r##"<pattern id="pat-{uid}" width="25" height="25" patternUnits="userSpaceOnUse">
                <rect width="25" height="25" fill="#fff"/>
                <path d="M 25 0 L 0 0 0 25" fill="none" stroke="#0984e3" stroke-width="1" opacity="0.15"/>
            </pattern>"##
            ),
            format!("url(#pat-{uid})"),
            "#333333",
        ),
        "gradient" => (
            format!(
                r##"<linearGradient id="pat-{uid}" x1="0%" y1="0%" x2="0%" y2="100%">
                <stop offset="0%" stop-color="#fff" />
                <stop offset="100%" stop-color="#fdcb6e" />
            </linearGradient>"##
            ),
            format!("url(#pat-{uid})"),
            "#333333",
        ),
        "black" => (String::new(), "#222".to_string(), "#f1f1f1"),
        "kraft" => (
            format!(
                r##"<pattern id="pat-{uid}" width="4" height="4" patternUnits="userSpaceOnUse">
                <rect width="4" height="4" fill="#e0d4b8"/>
                <rect width="1" height="1" fill="#cbbfa0"/>
            </pattern>"##
            ),
            format!("url(#pat-{uid})"),
            "#333333",
        ),
        "stars" => (
            format!(
                r##"<pattern id="pat-{uid}" width="50" height="50" patternUnits="userSpaceOnUse">
                <rect width="50" height="50" fill="#2c3e50"/>
                <circle cx="25" cy="25" r="1.5" fill="#fff" opacity="0.8"/>
                <circle cx="10" cy="10" r="1" fill="#fff" opacity="0.5"/>
                <circle cx="40" cy="40" r="1" fill="#fff" opacity="0.5"/>
            </pattern>"##
            ),
            format!("url(#pat-{uid})"),
            "#ffffff",
        ),
        "candy" => (
            format!(
                r##"<pattern id="pat-{uid}" width="20" height="20" patternUnits="userSpaceOnUse" patternTransform="rotate(45)">
                <rect width="20" height="20" fill="#fff"/>
                <rect width="10" height="20" fill="#ff9ff3"/>
            </pattern>"##
            ),
            format!("url(#pat-{uid})"),
            "#ff9ff3",
        ),
        "sunset" => (
            format!(
                r##"<linearGradient id="pat-{uid}" x1="0%" y1="0%" x2="0%" y2="100%">
                <stop offset="0%" stop-color="#6c5ce7" />
                <stop offset="50%" stop-color="#ff9f43" />
                <stop offset="100%" stop-color="#ff6b6b" />
            </linearGradient>"##
            ),
            format!("url(#pat-{uid})"),
            "#ffffff",
        ),
        "holo" => (
            format!(
                r##"<linearGradient id="pat-{uid}" x1="0%" y1="0%" x2="100%" y2="100%">
                <stop offset="0%" stop-color="#ff9a9e"/>
                <stop offset="25%" stop-color="#fad0c4"/>
                <stop offset="50%" stop-color="#a18cd1"/>
                <stop offset="75%" stop-color="#fad0c4"/>
                <stop offset="100%" stop-color="#ff9a9e"/>
            </linearGradient>"##
            ),
            format!("url(#pat-{uid})"),
            "#ffffff",
        ),
        "cyber" => (
            format!(
                r##"<pattern id="pat-{uid}" width="30" height="30" patternUnits="userSpaceOnUse">
                <rect width="30" height="30" fill="#120458"/>
                <path d="M30 0 L0 30 M0 0 L30 30" stroke="#00f2ea" stroke-width="1" opacity="0.3"/>
                <rect x="0" y="0" width="30" height="30" fill="none" stroke="#ff0055" stroke-width="1" opacity="0.2"/>
            </pattern>"##
            ),
            format!("url(#pat-{uid})"),
            "#00f2ea",
        ),
        "rainbow" => (
            format!(
                r##"<linearGradient id="pat-{uid}" x1="0%" y1="0%" x2="100%" y2="100%">
                <stop offset="0%" stop-color="#ff7675"/>
                <stop offset="20%" stop-color="#fab1a0"/>
                <stop offset="40%" stop-color="#ffeaa7"/>
                <stop offset="60%" stop-color="#55efc4"/>
                <stop offset="80%" stop-color="#74b9ff"/>
                <stop offset="100%" stop-color="#a29bfe"/>
            </linearGradient>"##
            ),
            format!("url(#pat-{uid})"),
            "#ffffff",
        ),
        _ => return plain_white(),
    };

    ResolvedStyle {
        defs,
        fill,
        caption_color: caption.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_white_has_no_defs() {
        let catalog = StyleCatalog::new();
        let s = catalog.resolve(&StyleRef::builtin("white"), "u1");
        assert!(s.defs.is_empty());
        assert_eq!(s.fill, "#fff");
        assert_eq!(s.caption_color, "#333333");
    }

    #[test]
    fn dark_styles_carry_light_captions() {
        let catalog = StyleCatalog::new();
        assert_eq!(
            catalog.resolve(&StyleRef::builtin("black"), "u").caption_color,
            "#f1f1f1"
        );
        assert_eq!(
            catalog.resolve(&StyleRef::builtin("stars"), "u").caption_color,
            "#ffffff"
        );
    }

    #[test]
    fn pattern_ids_are_namespaced_by_uid() {
        let catalog = StyleCatalog::new();
        let a = catalog.resolve(&StyleRef::builtin("dots"), "card-1");
        let b = catalog.resolve(&StyleRef::builtin("dots"), "card-2");
        assert!(a.defs.contains("pat-card-1"));
        assert!(b.defs.contains("pat-card-2"));
        assert_eq!(a.fill, "url(#pat-card-1)");
    }

    #[test]
    fn unknown_builtin_falls_back_to_white() {
        let catalog = StyleCatalog::new();
        let s = catalog.resolve(&StyleRef::builtin("no-such-style"), "u");
        assert_eq!(s.fill, "#fff");
    }

    #[test]
    fn registered_texture_resolves_and_unknown_custom_falls_back() {
        let mut catalog = StyleCatalog::new();
        let style = catalog.register_texture("data:image/png;base64,AAAA");
        let s = catalog.resolve(&style, "u");
        assert!(s.defs.contains("data:image/png;base64,AAAA"));
        assert_eq!(s.fill, "url(#pat-u)");

        let missing = catalog.resolve(&StyleRef::Custom(CustomStyleId(99)), "u");
        assert_eq!(missing.fill, "#fff");
    }

    #[test]
    fn caption_override_wins_over_palette() {
        let mut catalog = StyleCatalog::new();
        catalog.set_caption_color(StyleRef::builtin("candy"), "#123456");
        let s = catalog.resolve(&StyleRef::builtin("candy"), "u");
        assert_eq!(s.caption_color, "#123456");
    }
}
