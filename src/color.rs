//! Stable per-key chart colors derived from the key itself, so a series keeps
//! its color across renders without anything being stored. Different keys may
//! collide or look alike.

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSeed<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for ColorSeed<'a> {
    fn from(value: &'a str) -> Self {
        ColorSeed::Text(value)
    }
}

impl<'a> From<&'a String> for ColorSeed<'a> {
    fn from(value: &'a String) -> Self {
        ColorSeed::Text(value.as_str())
    }
}

impl From<f64> for ColorSeed<'_> {
    fn from(value: f64) -> Self {
        ColorSeed::Number(value)
    }
}

impl From<i32> for ColorSeed<'_> {
    fn from(value: i32) -> Self {
        ColorSeed::Number(value as f64)
    }
}

/// Polynomial rolling hash over UTF-16 code units, wrapping on overflow.
pub fn string_hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

/// Fractional part of `sin(x) * 10000`, in `[0, 1)`.
pub fn seeded_random(x: f64) -> f64 {
    let v = x.sin() * 10000.0;
    v - v.floor()
}

/// `#RRGGBB` color, one hex digit per position drawn from `seeded_random(seed + i)`.
pub fn seeded_color<'a>(seed: impl Into<ColorSeed<'a>>) -> String {
    let number = match seed.into() {
        ColorSeed::Text(text) => string_hash(text) as f64,
        ColorSeed::Number(n) => n,
    };
    let mut color = String::with_capacity(7);
    color.push('#');
    for i in 0..6 {
        let pick = (seeded_random(number + i as f64) * 16.0).floor() as usize;
        color.push(HEX_DIGITS[pick.min(15)] as char);
    }
    color
}
