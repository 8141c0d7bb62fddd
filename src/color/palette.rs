//! Fixed small RGB palette with nearest-color lookup
//!
//! Entry 0 is the background: cells quantized to it are treated as empty and
//! never handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::io::error::{Result, invalid_parameter};

/// Opaque RGB triple
pub type Rgb = [u8; 3];

/// Default composition palette, darkest first
pub const DEFAULT_PALETTE: [Rgb; 6] = [
    [12, 10, 18],
    [244, 236, 218],
    [214, 72, 92],
    [246, 176, 66],
    [92, 148, 98],
    [78, 112, 178],
];

/// Ordered, non-empty palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette from its entries
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.is_empty() {
            return Err(invalid_parameter(
                "palette",
                &"[]",
                &"palette needs at least one color",
            ));
        }
        Ok(Self { colors })
    }

    /// All entries in palette order
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of entries
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; a palette cannot be constructed empty
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The designated background entry (index 0)
    pub fn background(&self) -> Rgb {
        self.colors.first().copied().unwrap_or([0, 0, 0])
    }

    /// Entry at `index`, if any
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Index of the entry closest to `rgb` by squared channel distance
    ///
    /// Ties resolve to the earliest entry.
    pub fn nearest_index(&self, rgb: Rgb) -> usize {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (index, color) in self.colors.iter().enumerate() {
            let distance = squared_distance(rgb, *color);
            if distance < best_distance {
                best_distance = distance;
                best = index;
            }
        }
        best
    }

    /// Entry closest to `rgb`
    pub fn nearest(&self, rgb: Rgb) -> Rgb {
        self.get(self.nearest_index(rgb)).unwrap_or(rgb)
    }

    /// Index of the entry closest to a continuous color
    ///
    /// Used by error diffusion, whose working values may leave `[0, 255]`.
    pub fn nearest_index_f32(&self, rgb: [f32; 3]) -> usize {
        let mut best = 0;
        let mut best_distance = f32::INFINITY;
        for (index, color) in self.colors.iter().enumerate() {
            let dr = rgb[0] - f32::from(color[0]);
            let dg = rgb[1] - f32::from(color[1]);
            let db = rgb[2] - f32::from(color[2]);
            let distance = db.mul_add(db, dr.mul_add(dr, dg * dg));
            if distance < best_distance {
                best_distance = distance;
                best = index;
            }
        }
        best
    }

    /// Exact match against the background entry
    pub fn is_background(&self, rgb: Rgb) -> bool {
        rgb == self.background()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = crate::io::error::MosaicError;

    fn try_from(colors: Vec<Rgb>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

/// Squared Euclidean distance between two colors
pub fn squared_distance(a: Rgb, b: Rgb) -> u32 {
    let dr = i32::from(a[0]) - i32::from(b[0]);
    let dg = i32::from(a[1]) - i32::from(b[1]);
    let db = i32::from(a[2]) - i32::from(b[2]);
    (dr * dr + dg * dg + db * db) as u32
}
