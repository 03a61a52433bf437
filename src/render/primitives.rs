//! Minimal shared GPU primitives for the deck renderer.
//!
//! This module intentionally stays small and dependency-light so it can be reused by:
//! - the full-screen fade overlay
//! - segment billboard drawing (projected quads)
//! - overlay field stand-ins (header/footer strips)
//!
//! Coordinate convention:
//! - Vertex positions are in clip space (NDC). The deck renderer projects
//!   world-space billboards onto NDC on the CPU before batching; overlay
//!   quads are authored directly in NDC.

use std::mem;

/// Straight-alpha RGBA color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// GPU vertex for the colored-quad pipeline: clip-space position + color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl QuadVertex {
    pub const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    #[inline]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// A CPU-side batch of colored quads, rebuilt every frame.
///
/// Painter's order: quads are drawn in push order, so callers push
/// back-to-front (backdrop billboards first, fade overlay last).
#[derive(Debug, Default)]
pub struct QuadBatch {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u16>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Push an axis-aligned quad centered at `center` (NDC) with half-extents `half`.
    ///
    /// Panics if the batch would exceed `u16::MAX` vertices; a deck frame is a few
    /// hundred quads at most, so overflow indicates a bug in the caller.
    pub fn push_rect(&mut self, center: [f32; 2], half: [f32; 2], color: Rgba) {
        let base = self.vertices.len();
        assert!(
            base + 4 <= u16::MAX as usize,
            "QuadBatch: vertex count overflow for u16 indices"
        );

        let (cx, cy) = (center[0], center[1]);
        let (hw, hh) = (half[0], half[1]);
        let c = color.to_array();

        self.vertices.extend_from_slice(&[
            QuadVertex {
                position: [cx - hw, cy - hh],
                color: c,
            },
            QuadVertex {
                position: [cx + hw, cy - hh],
                color: c,
            },
            QuadVertex {
                position: [cx + hw, cy + hh],
                color: c,
            },
            QuadVertex {
                position: [cx - hw, cy + hh],
                color: c,
            },
        ]);

        let base = base as u16;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    /// Push a quad covering the whole viewport (used by the fade overlay).
    pub fn push_fullscreen(&mut self, color: Rgba) {
        self.push_rect([0.0, 0.0], [1.0, 1.0], color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_emits_two_triangles() {
        let mut batch = QuadBatch::new();
        batch.push_rect([0.0, 0.0], [0.5, 0.5], Rgba::WHITE);
        assert_eq!(batch.vertices.len(), 4);
        assert_eq!(batch.indices.len(), 6);
    }

    #[test]
    fn clear_resets_batch() {
        let mut batch = QuadBatch::new();
        batch.push_fullscreen(Rgba::BLACK);
        batch.clear();
        assert!(batch.is_empty());
    }
}
