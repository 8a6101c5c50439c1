use crate::alphabet::Alphabet;

/// Upper bound for [`LoadOptions::samples`].
pub const MAX_SAMPLES: u32 = 16;

/// Settings for loading and baking one font.
///
/// Built with `Default` and the `with_*` setters:
///
/// ```
/// use ferrous_font::LoadOptions;
/// let opts = LoadOptions::default().with_pixel_height(32.0).with_samples(8);
/// assert_eq!(opts.samples, 8);
/// ```
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Nominal pixel height (ascender to descender).
    pub pixel_height: f32,
    pub alphabet: Alphabet,
    /// Empty texels kept around every glyph in its atlas cell.
    pub padding: u32,
    /// Jittered accumulation passes per glyph; more samples, smoother edges.
    pub samples: u32,
    /// Minimum number of alphabet glyphs besides space the font must provide.
    pub min_glyphs: usize,
    /// Asset name; defaults to the source name.
    pub name: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            pixel_height: 48.0,
            alphabet: Alphabet::default(),
            padding: 2,
            samples: 4,
            min_glyphs: 1,
            name: None,
        }
    }
}

impl LoadOptions {
    pub fn with_pixel_height(mut self, pixel_height: f32) -> Self {
        self.pixel_height = pixel_height.max(1.0);
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples.clamp(1, MAX_SAMPLES);
        self
    }

    pub fn with_min_glyphs(mut self, min_glyphs: usize) -> Self {
        self.min_glyphs = min_glyphs;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}
