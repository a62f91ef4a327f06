//! Working canvas and clipped square patch windows
//!
//! All coordinates are `[x, y]` pairs. Storage is row-major, so ndarray
//! indices read `[y, x]` (and `[y, x, channel]` for the canvas).

use image::{Rgb, RgbImage};
use ndarray::{Array2, Array3, Axis};

/// Mutable RGB pixel buffer the fill loop writes into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Array3<u8>,
}

impl Canvas {
    /// Copy an image into a new canvas
    pub fn from_image(image: &RgbImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let mut pixels = Array3::zeros((height, width, 3));
        for (x, y, pixel) in image.enumerate_pixels() {
            for (c, &value) in pixel.0.iter().enumerate() {
                if let Some(slot) = pixels.get_mut([y as usize, x as usize, c]) {
                    *slot = value;
                }
            }
        }
        Self { pixels }
    }

    /// Render the canvas back into an image
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            Rgb(self.pixel(x as usize, y as usize).unwrap_or([0, 0, 0]))
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Color at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        Some([
            *self.pixels.get([y, x, 0])?,
            *self.pixels.get([y, x, 1])?,
            *self.pixels.get([y, x, 2])?,
        ])
    }

    /// Overwrite the color at `(x, y)`; writes outside the canvas are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, color: [u8; 3]) {
        for (c, value) in color.into_iter().enumerate() {
            if let Some(slot) = self.pixels.get_mut([y, x, c]) {
                *slot = value;
            }
        }
    }

    /// Copy of one color channel as a `(height, width)` plane
    pub fn channel(&self, channel: usize) -> Array2<u8> {
        if channel >= 3 {
            return Array2::zeros((self.height(), self.width()));
        }
        self.pixels.index_axis(Axis(2), channel).to_owned()
    }
}

/// One in-bounds cell of a [`PatchWindow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchCell {
    /// Horizontal offset from the window center
    pub dx: i64,
    /// Vertical offset from the window center
    pub dy: i64,
    /// Absolute column
    pub x: usize,
    /// Absolute row
    pub y: usize,
}

impl PatchCell {
    /// The cell at the same offset around another center
    ///
    /// Returns `None` if that cell would have a negative coordinate.
    pub const fn relative_to(&self, center: [usize; 2]) -> Option<[usize; 2]> {
        let Some(x) = center[0].checked_add_signed(self.dx as isize) else {
            return None;
        };
        let Some(y) = center[1].checked_add_signed(self.dy as isize) else {
            return None;
        };
        Some([x, y])
    }
}

/// Square window of side `2 * half + 1` centered on a pixel, clipped on all four sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchWindow {
    center: [usize; 2],
    half: usize,
    width: usize,
    height: usize,
}

impl PatchWindow {
    /// Window around `center` inside a `width` x `height` image
    pub const fn new(center: [usize; 2], half: usize, width: usize, height: usize) -> Self {
        Self {
            center,
            half,
            width,
            height,
        }
    }

    /// Window center `[x, y]`
    pub const fn center(&self) -> [usize; 2] {
        self.center
    }

    /// Number of cells in the unclipped window
    pub const fn full_area(&self) -> usize {
        let side = 2 * self.half + 1;
        side * side
    }

    /// Whether the unclipped window lies entirely inside the image
    pub const fn fits_inside(&self) -> bool {
        self.center[0] >= self.half
            && self.center[1] >= self.half
            && self.center[0] + self.half < self.width
            && self.center[1] + self.half < self.height
    }

    /// In-bounds cells in row-major offset order
    pub fn cells(self) -> impl Iterator<Item = PatchCell> {
        let half = self.half as i64;
        let (cx, cy) = (self.center[0] as i64, self.center[1] as i64);
        let (width, height) = (self.width as i64, self.height as i64);

        (-half..=half).flat_map(move |dy| {
            (-half..=half).filter_map(move |dx| {
                let (x, y) = (cx + dx, cy + dy);
                (x >= 0 && y >= 0 && x < width && y < height).then_some(PatchCell {
                    dx,
                    dy,
                    x: x as usize,
                    y: y as usize,
                })
            })
        })
    }
}
