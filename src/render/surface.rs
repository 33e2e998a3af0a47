//! The drawable raster.

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::types::Colour;

/// A fixed-size RGBA bitmap that pixels paint themselves onto.
///
/// A cleared surface is fully transparent; hosts composite it over the theme
/// background when presenting. Export instead fills it with the background so
/// each captured frame is opaque.
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Fill a `w` x `h` rectangle whose top-left corner is `(x, y)`.
    ///
    /// Parts of the rectangle outside the bitmap are clipped.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, colour: Colour) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(w)).min(i64::from(self.width()));
        let y1 = (y + i64::from(h)).min(i64::from(self.height()));

        let rgba = Rgba(colour.to_rgba());
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px as u32, py as u32, rgba);
            }
        }
    }

    /// Paint every pixel with `colour`.
    pub fn fill(&mut self, colour: Colour) {
        let rgba = Rgba(colour.to_rgba());
        for p in self.image.pixels_mut() {
            *p = rgba;
        }
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.fill(Colour::TRANSPARENT);
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Colour::new(p[0], p[1], p[2], p[3]))
    }

    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Composite the surface over `background` into a `0x00RRGGBB` buffer.
    pub fn to_u32_over(&self, background: Colour, out: &mut Vec<u32>) {
        out.clear();
        out.extend(
            self.image
                .pixels()
                .map(|p| Colour::new(p[0], p[1], p[2], p[3]).over(background).to_u32()),
        );
    }
}
