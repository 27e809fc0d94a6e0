use bytemuck::{Pod, Zeroable};

/// Per-frame uniform: which sheet cell to sample.
/// Stride = 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteUniform {
    /// Top-left of the cell, normalized sheet coordinates.
    pub uv_origin: [f32; 2],
    /// Cell size, normalized sheet coordinates.
    pub uv_size: [f32; 2],
}

impl SpriteUniform {
    /// From a `[u, v, du, dv]` rect as produced by `SpriteSheet::uv_rect`.
    pub fn from_uv_rect([u, v, du, dv]: [f32; 4]) -> Self {
        Self {
            uv_origin: [u, v],
            uv_size: [du, dv],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_the_shader() {
        assert_eq!(std::mem::size_of::<SpriteUniform>(), 16);
        let u = SpriteUniform::from_uv_rect([0.5, 0.25, 0.125, 0.25]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&u));
        assert_eq!(floats, &[0.5, 0.25, 0.125, 0.25]);
    }
}
