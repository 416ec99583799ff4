/// Deterministic per-user color via CRC32 hash of the nickname.
/// Returns (r, g, b) from first 3 bytes of hash.
pub fn user_color(nickname: &str) -> (u8, u8, u8) {
    let hash = crc32fast::hash(nickname.as_bytes());
    let bytes = hash.to_be_bytes();
    (bytes[0], bytes[1], bytes[2])
}

/// Per-user color with lightness pulled into a band that stays readable
/// against the active theme background.
pub fn themed_user_color(nickname: &str, dark: bool) -> (u8, u8, u8) {
    let (r, g, b) = user_color(nickname);
    let (h, s, l) = rgb_to_hsl(r, g, b);
    let (min_l, max_l) = if dark { (0.55, 0.75) } else { (0.30, 0.50) };
    hsl_to_rgb(h, s.max(0.45), l.clamp(min_l, max_l))
}

/// Format RGBA as a CSS color string.
pub fn rgba_css((r, g, b): (u8, u8, u8), a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// Convert RGB to HSL. Returns (h: 0..360, s: 0..1, l: 0..1).
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < f64::EPSILON {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < f64::EPSILON {
        let mut h = (g - b) / d;
        if g < b {
            h += 6.0;
        }
        h
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s, l)
}

/// Convert HSL to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s.abs() < f64::EPSILON {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::{hsl_to_rgb, rgb_to_hsl, rgba_css, themed_user_color, user_color};

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[test]
    fn roundtrip_rgb_through_hsl_is_identity() {
        let samples = [
            (0, 0, 0),
            (255, 255, 255),
            (128, 128, 128),
            (255, 0, 0),
            (37, 91, 201),
            (250, 180, 20),
        ];

        for (r, g, b) in samples {
            let (h, s, l) = rgb_to_hsl(r, g, b);
            assert_eq!(hsl_to_rgb(h, s, l), (r, g, b));
        }
    }

    #[test]
    fn rgb_to_hsl_gray_has_zero_saturation() {
        let (h, s, l) = rgb_to_hsl(128, 128, 128);
        assert_close(h, 0.0);
        assert_close(s, 0.0);
        assert_close(l, 128.0 / 255.0);
    }

    #[test]
    fn user_color_is_deterministic() {
        assert_eq!(user_color("하츠네"), user_color("하츠네"));
        assert_ne!(user_color("하츠네"), user_color("미쿠"));
    }

    #[test]
    fn themed_color_respects_lightness_band() {
        for name in ["a", "bb", "하츠네", "night_owl", "zzz"] {
            let (r, g, b) = themed_user_color(name, true);
            let (_, _, l) = rgb_to_hsl(r, g, b);
            assert!(l >= 0.54 && l <= 0.76, "dark lightness {l} for {name}");

            let (r, g, b) = themed_user_color(name, false);
            let (_, _, l) = rgb_to_hsl(r, g, b);
            assert!(l >= 0.29 && l <= 0.51, "light lightness {l} for {name}");
        }
    }

    #[test]
    fn rgba_css_formats_components() {
        assert_eq!(rgba_css((1, 2, 3), 0.5), "rgba(1,2,3,0.5)");
    }
}
