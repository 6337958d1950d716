//! Brightness to glyph quantization

/// Default ramp, sparse to dense; the leading space is the background
pub const DEFAULT_RAMP: &str = " .-=+*#%@";

/// Ordered character ramp from background to densest ink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ramp {
    chars: Vec<char>,
}

impl Default for Ramp {
    fn default() -> Self {
        Self::new(DEFAULT_RAMP)
    }
}

impl Ramp {
    /// Build a ramp from `glyphs`. An empty string falls back to a lone space.
    pub fn new(glyphs: &str) -> Self {
        let mut chars: Vec<char> = glyphs.chars().collect();
        if chars.is_empty() {
            chars.push(' ');
        }
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character drawn where nothing was hit
    pub fn background(&self) -> char {
        self.chars[0]
    }

    /// Ramp index for `brightness`; 0 (background) for anything not above zero
    pub fn index(&self, brightness: f32) -> usize {
        // NaN fails the comparison too and lands on background
        if !(brightness > 0.0) {
            return 0;
        }
        let last = self.chars.len() - 1;
        ((brightness * last as f32) as usize).min(last)
    }

    pub fn to_char(&self, brightness: f32) -> char {
        if !(brightness > 0.0) {
            return self.background();
        }
        self.chars[self.index(brightness)]
    }
}
