// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Layers and display lists.
//!
//! A layer keeps the ordered set of proxies attached to it. Drawing walks
//! those proxies once and replaces the layer's display list; nothing is
//! redrawn until the next explicit draw.

use super::shapes::Group;
use crate::models::EntityKey;
use indexmap::IndexSet;

/// Kind of annotation a layer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Segments,
    Points,
}

/// A flattened drawing command in view-local pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Full-height translucent band.
    Band {
        x: f64,
        width: f64,
        color: String,
        opacity: f32,
    },
    /// Full-height vertical line starting at y = 0.
    Line {
        x: f64,
        height: f64,
        color: String,
        stroke_width: f32,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        opacity: f32,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f32,
        color: String,
    },
}

#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    children: IndexSet<EntityKey>,
    display: Vec<Primitive>,
    draw_calls: u64,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            children: IndexSet::new(),
            display: Vec::new(),
            draw_calls: 0,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Attach a proxy on top of the existing ones.
    pub fn add(&mut self, key: EntityKey) {
        self.children.insert(key);
    }

    /// Detach one proxy, keeping the order of the rest.
    pub fn remove(&mut self, key: EntityKey) -> bool {
        self.children.shift_remove(&key)
    }

    /// Detach every proxy at once.
    pub fn remove_children(&mut self) {
        self.children.clear();
    }

    pub fn contains(&self, key: EntityKey) -> bool {
        self.children.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.children.iter().copied()
    }

    /// Rebuild the display list from the attached proxies, bottom to top.
    pub fn draw<'a>(&mut self, mut group_of: impl FnMut(EntityKey) -> Option<&'a Group>) {
        self.display.clear();
        for key in &self.children {
            if let Some(group) = group_of(*key) {
                group.paint(&mut self.display);
            }
        }
        self.draw_calls += 1;
    }

    /// Primitives produced by the last draw.
    pub fn display_list(&self) -> &[Primitive] {
        &self.display
    }

    /// Number of draws since the layer was created.
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }
}

/// Layers of one view, bottom to top.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn get(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    /// The layer of `kind`, pushed on top if the stack has none yet.
    pub fn ensure(&mut self, kind: LayerKind) -> &mut Layer {
        let index = match self.layers.iter().position(|layer| layer.kind == kind) {
            Some(index) => index,
            None => {
                self.layers.push(Layer::new(kind));
                self.layers.len() - 1
            }
        };
        &mut self.layers[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::shapes::Handles;

    #[test]
    fn test_draw_counts_once_per_call() {
        let group = Group::new(Handles::Empty, None, None);
        let mut layer = Layer::new(LayerKind::Segments);
        layer.add(EntityKey::new(1));
        layer.add(EntityKey::new(2));

        layer.draw(|_| Some(&group));
        assert_eq!(layer.draw_calls(), 1);
        assert!(layer.display_list().is_empty());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut layer = Layer::new(LayerKind::Points);
        for raw in 0..4 {
            layer.add(EntityKey::new(raw));
        }
        assert!(layer.remove(EntityKey::new(1)));
        assert!(!layer.remove(EntityKey::new(1)));
        let order: Vec<u64> = layer.children().map(EntityKey::raw).collect();
        assert_eq!(order, vec![0, 2, 3]);

        layer.remove_children();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_stack_creates_layers_on_top() {
        let mut stack = LayerStack::default();
        stack.ensure(LayerKind::Segments);
        stack.ensure(LayerKind::Points);
        stack.ensure(LayerKind::Segments);
        let kinds: Vec<LayerKind> = stack.iter().map(Layer::kind).collect();
        assert_eq!(kinds, vec![LayerKind::Segments, LayerKind::Points]);
    }
}
