/// Axis-aligned rectangle in page space with a top-left origin.
///
/// `x0`/`x1` grow to the right and `top`/`bottom` grow downward, so a
/// widget near the top of a letter page has a small `top`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Convert a PDF `/Rect` (`[llx lly urx ury]`, bottom-left origin) into
    /// a top-left origin box for a page of the given height.
    ///
    /// The corners may come in any order; they are normalized first.
    pub fn from_pdf_rect(rect: [f64; 4], page_height: f64) -> Self {
        let (llx, urx) = (rect[0].min(rect[2]), rect[0].max(rect[2]));
        let (lly, ury) = (rect[1].min(rect[3]), rect[1].max(rect[3]));
        Self {
            x0: llx,
            top: page_height - ury,
            x1: urx,
            bottom: page_height - lly,
        }
    }

    /// The box as `[left, top, right, bottom]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x0, self.top, self.x1, self.bottom]
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}
