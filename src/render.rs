//! Card compositing: builds one card's SVG document from its geometry,
//! resolved style, image handle and caption.
//!
//! The layer order, back to front: style fill, procedural paper texture,
//! dark backing rect, the image with a warm color grade and a multiply-mode
//! vignette, the development overlay, the caption. Rendering is a pure
//! function of its inputs; all mutable presentation (position, transform,
//! clip, overlay fade) lives outside the markup.

use crate::{layout::FrameGeometry, style::ResolvedStyle};

pub const CAPTION_FONT_SIZE: f64 = 36.0;
/// Handwritten latin face first, then regional CJK fallbacks.
pub const CAPTION_FONT_STACK: &str = "'Caveat', 'PingFang SC', 'Hiragino Sans GB', 'Microsoft YaHei', 'SimHei', 'Heiti SC', 'WenQuanYi Micro Hei', sans-serif";

/// Whether the development overlay still occludes the image region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Development {
    Undeveloped,
    Developed,
}

/// Render a card for on-screen use (the host sizes it via its container).
pub fn render_card(
    geometry: &FrameGeometry,
    style: &ResolvedStyle,
    image_href: &str,
    caption: &str,
    uid: &str,
    development: Development,
) -> String {
    svg_document(
        geometry,
        style,
        image_href,
        caption,
        uid,
        development,
        "100%",
        "100%",
    )
}

/// Render a standalone copy at its natural frame size, e.g. for export.
pub fn render_export(
    geometry: &FrameGeometry,
    style: &ResolvedStyle,
    image_href: &str,
    caption: &str,
    uid: &str,
) -> String {
    svg_document(
        geometry,
        style,
        image_href,
        caption,
        uid,
        Development::Developed,
        &geometry.frame_w.to_string(),
        &geometry.frame_h.to_string(),
    )
}

#[allow(clippy::too_many_arguments)]
fn svg_document(
    geometry: &FrameGeometry,
    style: &ResolvedStyle,
    image_href: &str,
    caption: &str,
    uid: &str,
    development: Development,
    width_attr: &str,
    height_attr: &str,
) -> String {
    let FrameGeometry {
        image_w,
        image_h,
        frame_w,
        frame_h,
        caption_y,
    } = *geometry;
    let pad_x = crate::layout::FRAME_PADDING_X;
    let pad_top = crate::layout::FRAME_PADDING_TOP;
    let overlay_opacity = match development {
        Development::Undeveloped => 1.0,
        Development::Developed => 0.0,
    };
    let caption = xml_escape(caption);
    let image_href = xml_escape(image_href);
    let caption_x = frame_w / 2.0;
    let defs = &style.defs;
    let fill = &style.fill;
    let caption_color = &style.caption_color;
    let font_stack = CAPTION_FONT_STACK;
    let font_size = CAPTION_FONT_SIZE;

    format!(
        r##"<svg viewBox="0 0 {frame_w} {frame_h}" width="{width_attr}" height="{height_attr}" xmlns="http://www.w3.org/2000/svg" style="display:block; filter: drop-shadow(0 4px 20px rgba(0,0,0,0.15));">
    <defs>
        <clipPath id="clip-{uid}">
            <rect x="{pad_x}" y="{pad_top}" width="{image_w}" height="{image_h}" rx="2"/>
        </clipPath>
        <filter id="paper-{uid}">
            <feTurbulence type="fractalNoise" baseFrequency="0.04" numOctaves="5" result="noise"/>
            <feDiffuseLighting in="noise" lighting-color="#fff" surfaceScale="1">
                <feDistantLight azimuth="45" elevation="60"/>
            </feDiffuseLighting>
        </filter>
        <filter id="grade-{uid}">
            <feColorMatrix type="matrix" values="
                1.1 0   0   0   -0.02
                0   1.05 0  0   -0.02
                0   0   0.9 0   0.03
                0   0   0   1   0
            "/>
        </filter>
        <radialGradient id="vig-{uid}" cx="50%" cy="50%" r="70%" fx="50%" fy="50%">
            <stop offset="40%" stop-color="#000" stop-opacity="0"/>
            <stop offset="100%" stop-color="#000" stop-opacity="0.4"/>
        </radialGradient>
        {defs}
    </defs>
    <rect width="{frame_w}" height="{frame_h}" fill="{fill}"/>
    <rect width="{frame_w}" height="{frame_h}" fill="#f8f8f8" opacity="0.2" filter="url(#paper-{uid})"/>
    <rect x="{pad_x}" y="{pad_top}" width="{image_w}" height="{image_h}" fill="#111"/>
    <image x="{pad_x}" y="{pad_top}" width="{image_w}" height="{image_h}" href="{image_href}" preserveAspectRatio="xMidYMid slice" clip-path="url(#clip-{uid})" filter="url(#grade-{uid})"/>
    <rect x="{pad_x}" y="{pad_top}" width="{image_w}" height="{image_h}" fill="url(#vig-{uid})" clip-path="url(#clip-{uid})" style="mix-blend-mode: multiply; pointer-events: none;"/>
    <rect class="dev-overlay" x="{pad_x}" y="{pad_top}" width="{image_w}" height="{image_h}" fill="#050505" opacity="{overlay_opacity}"/>
    <text x="{caption_x}" y="{caption_y}" text-anchor="middle" dominant-baseline="middle" font-family="{font_stack}" font-weight="400" font-size="{font_size}" fill="{caption_color}">{caption}</text>
</svg>"##
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::frame_geometry;
    use crate::style::{StyleCatalog, StyleRef, StyleResolver};

    fn setup() -> (FrameGeometry, ResolvedStyle) {
        let geometry = frame_geometry(400.0, 300.0).unwrap();
        let style = StyleCatalog::new().resolve(&StyleRef::builtin("white"), "c1");
        (geometry, style)
    }

    #[test]
    fn rendering_is_pure() {
        let (geometry, style) = setup();
        let a = render_card(&geometry, &style, "img.png", "hi", "c1", Development::Undeveloped);
        let b = render_card(&geometry, &style, "img.png", "hi", "c1", Development::Undeveloped);
        assert_eq!(a, b);
    }

    #[test]
    fn undeveloped_overlay_occludes_the_image_region() {
        let (geometry, style) = setup();
        let svg = render_card(&geometry, &style, "img.png", "hi", "c1", Development::Undeveloped);
        assert!(svg.contains(r#"class="dev-overlay""#));
        assert!(svg.contains(r##"fill="#050505" opacity="1""##));

        let developed =
            render_card(&geometry, &style, "img.png", "hi", "c1", Development::Developed);
        assert!(developed.contains(r##"fill="#050505" opacity="0""##));
    }

    #[test]
    fn layers_appear_back_to_front() {
        let (geometry, style) = setup();
        let svg = render_card(&geometry, &style, "img.png", "hi", "c1", Development::Undeveloped);
        let backing = svg.find(r##"fill="#111""##).unwrap();
        let image = svg.find("<image").unwrap();
        let vignette = svg.find("mix-blend-mode: multiply").unwrap();
        let overlay = svg.find("dev-overlay").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(backing < image);
        assert!(image < vignette);
        assert!(vignette < overlay);
        assert!(overlay < text);
    }

    #[test]
    fn caption_is_centered_and_escaped() {
        let (geometry, style) = setup();
        let svg = render_card(
            &geometry,
            &style,
            "img.png",
            "a <b> & \"c\"",
            "c1",
            Development::Undeveloped,
        );
        assert!(svg.contains("a &lt;b&gt; &amp; &quot;c&quot;"));
        // frame is 350 wide, caption band center is at y=290
        assert!(svg.contains(r#"<text x="175" y="290""#));
    }

    #[test]
    fn export_uses_natural_frame_size_and_clears_the_overlay() {
        let (geometry, style) = setup();
        let svg = render_export(&geometry, &style, "img.png", "hi", "c1");
        assert!(svg.contains(r#"width="350" height="330""#));
        assert!(svg.contains(r##"fill="#050505" opacity="0""##));
    }

    #[test]
    fn style_defs_are_embedded() {
        let geometry = frame_geometry(400.0, 300.0).unwrap();
        let style = StyleCatalog::new().resolve(&StyleRef::builtin("dots"), "c9");
        let svg = render_card(&geometry, &style, "img.png", "", "c9", Development::Undeveloped);
        assert!(svg.contains("pat-c9"));
        assert!(svg.contains(r#"fill="url(#pat-c9)""#));
    }
}
