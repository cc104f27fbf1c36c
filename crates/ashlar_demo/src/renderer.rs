// SPDX-License-Identifier: MIT OR Apache-2.0
//! Renderer that records draw calls instead of drawing.

use ashlar_physics::{DrawItem, FrameLighting, RenderPass, Renderer, ShapeKind};
use std::collections::HashMap;

/// Counts frames, passes and items per shape kind
#[derive(Debug, Default)]
pub struct LoggingRenderer {
    frames: u64,
    post_processed_frames: u64,
    items_per_pass: HashMap<RenderPass, u64>,
    items_per_kind: HashMap<&'static str, u64>,
}

impl LoggingRenderer {
    /// Frames begun so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Items submitted to a pass so far
    pub fn items_in(&self, pass: RenderPass) -> u64 {
        self.items_per_pass.get(&pass).copied().unwrap_or(0)
    }

    /// Log the totals
    pub fn log_summary(&self) {
        tracing::info!(
            "Rendered {} frames ({} post-processed): shadow {}, lit {}, lamp {}",
            self.frames(),
            self.post_processed_frames,
            self.items_in(RenderPass::Shadow),
            self.items_in(RenderPass::Lit),
            self.items_in(RenderPass::Lamp)
        );

        let mut kinds: Vec<_> = self.items_per_kind.iter().collect();
        kinds.sort();
        for (kind, count) in kinds {
            tracing::debug!("  {kind}: {count} lit draws");
        }
    }
}

impl Renderer for LoggingRenderer {
    fn begin_frame(&mut self, lighting: &FrameLighting) {
        self.frames += 1;
        if lighting.post_processing {
            self.post_processed_frames += 1;
        }
        tracing::trace!(
            "Frame {} light {:?} view {:?}",
            self.frames,
            lighting.light_position,
            lighting.view_position
        );
    }

    fn draw(&mut self, pass: RenderPass, items: &[DrawItem<'_>]) {
        *self.items_per_pass.entry(pass).or_default() += items.len() as u64;

        if pass == RenderPass::Lit {
            for item in items {
                let kind: &ShapeKind = item.kind;
                *self.items_per_kind.entry(kind.name()).or_default() += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashlar_physics::RigidShape;
    use glam::Vec3;

    #[test]
    fn test_counts_per_pass_and_kind() {
        let cube = RigidShape::cube();
        let sphere = RigidShape::sphere(1.0);
        let items = [
            DrawItem::from_shape(None, &cube),
            DrawItem::from_shape(None, &sphere),
        ];

        let mut renderer = LoggingRenderer::default();
        renderer.begin_frame(&FrameLighting {
            light_position: Vec3::new(40.0, 5.0, -5.0),
            view_position: Vec3::ZERO,
            post_processing: true,
        });
        renderer.draw(RenderPass::Shadow, &items);
        renderer.draw(RenderPass::Lit, &items);
        renderer.end_frame();

        assert_eq!(renderer.frames(), 1);
        assert_eq!(renderer.items_in(RenderPass::Shadow), 2);
        assert_eq!(renderer.items_in(RenderPass::Lamp), 0);
        assert_eq!(renderer.items_per_kind.get("sphere"), Some(&1));
    }
}
