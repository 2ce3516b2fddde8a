//! Drawable leaves of the scene graph and tagged collections of them.

use std::any::Any;

use log::{info, warn};

use crate::config;
use crate::gfx::render::{DrawCall, DrawContext, DrawSource, MeshId};
use crate::gfx::scene::{NodeBehavior, NodeId, SceneGraph, WorldTransform};
use crate::math::Vector3;

/// A mesh placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    mesh: MeshId,
    texture: Option<String>,
    visible: bool,
    wireframe: bool,
    radius: f32,
}

impl Item {
    pub fn new(mesh: MeshId) -> Self {
        Self {
            mesh,
            texture: None,
            visible: true,
            wireframe: false,
            radius: 0.0,
        }
    }

    /// Item whose bounding radius is derived from the mesh vertices.
    pub fn with_vertices(mesh: MeshId, vertices: &[Vector3]) -> Self {
        let mut item = Self::new(mesh);
        item.radius = bounding_radius(vertices);
        item
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn set_texture(&mut self, name: impl Into<String>) {
        self.texture = Some(name.into());
    }

    pub fn clear_texture(&mut self) {
        self.texture = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    /// Half the diagonal of the mesh bounding box.
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl NodeBehavior for Item {
    fn draw_self(&mut self, node: NodeId, world: &WorldTransform, ctx: &mut DrawContext<'_>) {
        if !self.visible {
            return;
        }

        let mut call = DrawCall::new(node, DrawSource::Mesh(self.mesh), world.matrix);
        call.wireframe = self.wireframe || ctx.config.get_bool(config::WIREFRAME);
        if ctx.config.get_bool(config::TEXTURES) {
            call.texture = self.texture.clone();
        }
        ctx.submit(call);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn bounding_radius(vertices: &[Vector3]) -> f32 {
    let Some(first) = vertices.first() else {
        warn!("Item :: No vertices to calculate radius");
        return 0.0;
    };

    let (min, max) = vertices.iter().fold((*first, *first), |(min, max), v| {
        (
            Vector3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z)),
            Vector3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z)),
        )
    });

    (max - min).magnitude() * 0.5
}

#[derive(Debug, Clone, PartialEq)]
struct TaggedItem {
    node: NodeId,
    tags: Vec<String>,
}

/// Tagged collection of item nodes, for toggling related items together.
///
/// The group only references its items. They are usually attached as its
/// children so they follow the group's transform and draw with it.
#[derive(Debug, Default)]
pub struct ItemGroup {
    items: Vec<TaggedItem>,
}

impl ItemGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` with `tags`. Returns `false` if it is already a member.
    pub fn add(&mut self, node: NodeId, tags: &[&str]) -> bool {
        if self.index_of(node).is_some() {
            warn!("ItemGroup :: Item {} already exists in group", node);
            return false;
        }

        self.items.push(TaggedItem {
            node,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        });
        info!("ItemGroup :: Added item to group with {} tags", tags.len());
        true
    }

    pub fn remove(&mut self, node: NodeId) -> bool {
        match self.index_of(node) {
            Some(index) => self.remove_at(index),
            None => {
                warn!("ItemGroup :: Item {} not found in group", node);
                false
            }
        }
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            warn!("ItemGroup :: Invalid item index {}", index);
            return false;
        }
        self.items.remove(index);
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).map(|entry| entry.node)
    }

    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.items.iter().position(|entry| entry.node == node)
    }

    pub fn items(&self) -> Vec<NodeId> {
        self.items.iter().map(|entry| entry.node).collect()
    }

    pub fn add_tag(&mut self, node: NodeId, tag: &str) {
        if let Some(entry) = self.entry_mut(node) {
            entry.tags.push(tag.to_string());
        }
    }

    pub fn remove_tag(&mut self, node: NodeId, tag: &str) {
        if let Some(entry) = self.entry_mut(node) {
            entry.tags.retain(|t| t != tag);
        }
    }

    pub fn set_tags(&mut self, node: NodeId, tags: &[&str]) {
        if let Some(entry) = self.entry_mut(node) {
            entry.tags = tags.iter().map(|tag| tag.to_string()).collect();
        }
    }

    pub fn tags(&self, node: NodeId) -> &[String] {
        self.items
            .iter()
            .find(|entry| entry.node == node)
            .map(|entry| entry.tags.as_slice())
            .unwrap_or(&[])
    }

    /// Unique tags in first-seen order.
    pub fn all_tags(&self) -> Vec<String> {
        let mut all: Vec<String> = Vec::new();
        for tag in self.items.iter().flat_map(|entry| &entry.tags) {
            if !all.contains(tag) {
                all.push(tag.clone());
            }
        }
        all
    }

    pub fn items_with_tag(&self, tag: &str) -> Vec<NodeId> {
        self.items
            .iter()
            .filter(|entry| entry.tags.iter().any(|t| t == tag))
            .map(|entry| entry.node)
            .collect()
    }

    pub fn count_with_tag(&self, tag: &str) -> usize {
        self.items_with_tag(tag).len()
    }

    fn entry_mut(&mut self, node: NodeId) -> Option<&mut TaggedItem> {
        let entry = self.items.iter_mut().find(|entry| entry.node == node);
        if entry.is_none() {
            warn!("ItemGroup :: Item {} not found in group", node);
        }
        entry
    }

    /// Sets the wireframe flag on every item of the group node `group`.
    pub fn set_wireframe(graph: &mut SceneGraph, group: NodeId, wireframe: bool) {
        Self::for_each_item(graph, group, None, |item| item.set_wireframe(wireframe));
    }

    /// Shows or hides every item of the group node `group`.
    pub fn set_visible(graph: &mut SceneGraph, group: NodeId, visible: bool) {
        Self::for_each_item(graph, group, None, |item| item.set_visible(visible));
    }

    /// Shows or hides the items of `group` carrying `tag`.
    pub fn set_visible_with_tag(graph: &mut SceneGraph, group: NodeId, tag: &str, visible: bool) {
        Self::for_each_item(graph, group, Some(tag), |item| item.set_visible(visible));
    }

    fn for_each_item<F: FnMut(&mut Item)>(
        graph: &mut SceneGraph,
        group: NodeId,
        tag: Option<&str>,
        mut f: F,
    ) {
        let members = match graph.behavior::<ItemGroup>(group) {
            Some(items) => match tag {
                Some(tag) => items.items_with_tag(tag),
                None => items.items(),
            },
            None => {
                warn!("ItemGroup :: Node {} is not an item group", group);
                return;
            }
        };

        for node in members {
            if let Some(item) = graph.behavior_mut::<Item>(node) {
                f(item);
            }
        }
    }
}

impl NodeBehavior for ItemGroup {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
