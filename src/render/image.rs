// src/render/image.rs
use crate::math::{error::*, types::*, utils::shading::saturate};

/// Standard-"over"-Mischung (nicht vormultipliziert): `src` über `dst`
pub fn over(src: Rgba, dst: Rgba) -> Rgba {
    let alpha = src.w + dst.w * (1.0 - src.w);
    if alpha <= 0.0 {
        return Vec4::ZERO;
    }
    let rgb = (src.truncate() * src.w + dst.truncate() * dst.w * (1.0 - src.w)) / alpha;
    rgb.extend(alpha)
}

/// RGBA-Pixelpuffer (Zeilen von oben nach unten)
#[derive(Debug, Clone, PartialEq)]
pub struct GridImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl GridImage {
    pub fn new(width: u32, height: u32) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidConfiguration {
                message: format!("Image must not be empty, got {width}x{height}"),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.pixels[index] = color;
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Mischt das Bild über einen einfarbigen Hintergrund
    pub fn composite_over(&self, background: Rgba) -> GridImage {
        GridImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| over(p, background)).collect(),
        }
    }

    /// 8-Bit-RGBA, z.B. für eine Textur
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        self.write_rgba8(&mut bytes);
        bytes
    }

    /// Wie [`GridImage::to_rgba8`], schreibt aber in einen bestehenden Puffer
    pub fn write_rgba8(&self, bytes: &mut Vec<u8>) {
        bytes.clear();
        bytes.extend(
            self.pixels
                .iter()
                .flat_map(|p| p.to_array().map(|c| (saturate(c) * 255.0).round() as u8)),
        );
    }
}
