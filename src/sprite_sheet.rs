//! The embedded oneko sprite sheet: decode, key-color transparency, cell lookup.

use glam::UVec2;

use crate::error::NekoError;
use crate::pet::animation;

/// The sheet bundled into the binary. 8x4 grid of 32x32 cells on a LimeGreen
/// background.
pub const ONEKO_PNG: &[u8] = include_bytes!("../assets/oneko.png");

/// Pixel rectangle of one cell inside the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A decoded, immutable sprite sheet with straight RGBA8 pixels.
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    pub cell: UVec2,
    rgba: Vec<u8>,
}

impl SpriteSheet {
    /// Decode PNG bytes. Pixels matching `key_color` become fully transparent.
    pub fn from_png_bytes(bytes: &[u8], cell: UVec2, key_color: [u8; 3]) -> Result<Self, NekoError> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba(width, height, img.into_raw(), cell, key_color)
    }

    /// Build from raw RGBA8 pixels, validating the grid against the sprite map.
    pub fn from_rgba(
        width: u32,
        height: u32,
        mut rgba: Vec<u8>,
        cell: UVec2,
        key_color: [u8; 3],
    ) -> Result<Self, NekoError> {
        let (cols, rows) = animation::required_grid();
        let fits = cell.x > 0
            && cell.y > 0
            && width % cell.x == 0
            && height % cell.y == 0
            && width / cell.x >= cols
            && height / cell.y >= rows
            && rgba.len() == (width * height * 4) as usize;
        if !fits {
            return Err(NekoError::SpriteGeometry {
                width,
                height,
                cell_width: cell.x,
                cell_height: cell.y,
                cols,
                rows,
            });
        }

        let mut keyed = 0usize;
        for px in rgba.chunks_exact_mut(4) {
            if px[..3] == key_color {
                // Zero the color too so premultiplied blending stays clean.
                px.copy_from_slice(&[0, 0, 0, 0]);
                keyed += 1;
            }
        }
        log::info!(
            "Sprite sheet {}x{} ({} cells), {} key-color pixels cleared",
            width,
            height,
            (width / cell.x) * (height / cell.y),
            keyed
        );

        Ok(Self {
            width,
            height,
            cell,
            rgba,
        })
    }

    /// The bundled sheet.
    pub fn embedded(cell: UVec2, key_color: [u8; 3]) -> Result<Self, NekoError> {
        Self::from_png_bytes(ONEKO_PNG, cell, key_color)
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Pixel rect of grid cell (`col`, `row`).
    pub fn cell_rect(&self, (col, row): (u32, u32)) -> CellRect {
        CellRect {
            x: col * self.cell.x,
            y: row * self.cell.y,
            width: self.cell.x,
            height: self.cell.y,
        }
    }

    /// Normalized texture coordinates `[u, v, du, dv]` of a cell.
    pub fn uv_rect(&self, cell: (u32, u32)) -> [f32; 4] {
        let r = self.cell_rect(cell);
        let (w, h) = (self.width as f32, self.height as f32);
        [
            r.x as f32 / w,
            r.y as f32 / h,
            r.width as f32 / w,
            r.height as f32 / h,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 3] = [0x32, 0xCD, 0x32];

    fn solid(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        px.repeat((width * height) as usize)
    }

    #[test]
    fn embedded_sheet_decodes() {
        let sheet = SpriteSheet::embedded(UVec2::splat(32), KEY).unwrap();
        assert_eq!((sheet.width, sheet.height), (256, 128));
        // Corners of every cell are background, so they must be transparent.
        assert_eq!(&sheet.rgba()[..4], &[0, 0, 0, 0]);
        assert!(sheet.rgba().chunks_exact(4).any(|p| p[3] == 255));
    }

    #[test]
    fn key_color_becomes_transparent() {
        let mut rgba = solid(256, 128, [0x32, 0xCD, 0x32, 255]);
        rgba[4..8].copy_from_slice(&[10, 20, 30, 255]);
        let sheet = SpriteSheet::from_rgba(256, 128, rgba, UVec2::splat(32), KEY).unwrap();
        assert_eq!(&sheet.rgba()[0..4], &[0, 0, 0, 0]);
        assert_eq!(&sheet.rgba()[4..8], &[10, 20, 30, 255]);
    }

    #[test]
    fn rejects_partial_cells_and_small_sheets() {
        let bad = SpriteSheet::from_rgba(250, 128, solid(250, 128, [0; 4]), UVec2::splat(32), KEY);
        assert!(matches!(bad, Err(NekoError::SpriteGeometry { .. })));

        let small = SpriteSheet::from_rgba(128, 128, solid(128, 128, [0; 4]), UVec2::splat(32), KEY);
        assert!(matches!(small, Err(NekoError::SpriteGeometry { cols: 8, rows: 4, .. })));
    }

    #[test]
    fn corrupt_png_is_a_decode_error() {
        let err = SpriteSheet::from_png_bytes(b"not a png", UVec2::splat(32), KEY);
        assert!(matches!(err, Err(NekoError::SpriteDecode(_))));
    }

    #[test]
    fn cell_rects_and_uvs() {
        let sheet = SpriteSheet::from_rgba(256, 128, solid(256, 128, [0; 4]), UVec2::splat(32), KEY).unwrap();
        assert_eq!(
            sheet.cell_rect((7, 3)),
            CellRect { x: 224, y: 96, width: 32, height: 32 }
        );
        assert_eq!(sheet.uv_rect((4, 2)), [0.5, 0.5, 0.125, 0.25]);
    }
}
