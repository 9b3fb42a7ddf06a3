//! Scene queries: by name, by widget type, by region; debug dump.

use std::fmt::Write as _;

use super::node::{Drawable, NodeId};
use super::tree::Scene;
use crate::geometry::Bounds;

impl Scene {
    /// Find the first drawable (in depth-first order from the root) with the
    /// given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let root = self.root()?;
        self.walk_depth_first(root)
            .into_iter()
            .find(|&id| self.nodes[id].name == name)
    }

    /// All drawables whose widget has the given type name, in arena order.
    pub fn query_by_type(&self, widget_type: &str) -> Vec<NodeId> {
        self.nodes
            .keys()
            .filter(|&id| self.widget(id).is_some_and(|w| w.widget_type() == widget_type))
            .collect()
    }

    /// All drawables matching an arbitrary predicate, in arena order.
    pub fn query_all(&self, predicate: impl Fn(&Drawable) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, data)| predicate(data))
            .map(|(id, _)| id)
            .collect()
    }

    /// Rendered drawables under the root whose window-space bounds overlap
    /// `region`, in depth-first (draw) order.
    pub fn nodes_in(&self, region: Bounds) -> Vec<NodeId> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.nodes[id].renders)
            .filter(|&id| self.bounds(id).is_some_and(|b| b.overlaps(region)))
            .collect()
    }

    /// Indented dump of the subtree at `start`, one drawable per line.
    pub fn debug_tree(&self, start: NodeId) -> String {
        let mut out = String::new();
        self.dump(start, 0, &mut out);
        out
    }

    fn dump(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        let kind = self.widget(id).map_or("?", |w| w.widget_type());
        let _ = write!(
            out,
            "{:indent$}{} [{}] at ({}, {}) size {}x{}",
            "",
            node.name,
            kind,
            node.at.x,
            node.at.y,
            node.size.x,
            node.size.y,
            indent = depth * 2
        );
        if node.has_visible_size() {
            let visible = node.visible();
            let _ = write!(out, " visible {}x{}", visible.x, visible.y);
        }
        if !node.enabled {
            out.push_str(" disabled");
        }
        if !node.renders {
            out.push_str(" hidden");
        }
        out.push('\n');
        for &child in self.children(id) {
            self.dump(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::Drawable;
    use crate::dom::tree::Scene;
    use crate::geometry::Bounds;
    use crate::widgets::{Block, Group};

    /// ```text
    ///   root (Group, 200x200)
    ///   ├── sidebar (Group at 0,0 50x200)
    ///   │   └── save (Block at 5,5 40x20)
    ///   └── main (Group at 50,0 150x200, hidden)
    /// ```
    fn build_query_tree() -> Scene {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().named("root").size(200.0, 200.0), Group);
        let sidebar = scene
            .insert_child(root, Drawable::new().named("sidebar").size(50.0, 200.0), Group)
            .unwrap();
        scene
            .insert_child(sidebar, Drawable::new().named("save").at(5.0, 5.0).size(40.0, 20.0), Block::default())
            .unwrap();
        scene
            .insert_child(
                root,
                Drawable::new().named("main").at(50.0, 0.0).size(150.0, 200.0).renders(false),
                Group,
            )
            .unwrap();
        scene
    }

    #[test]
    fn find_by_name() {
        let scene = build_query_tree();
        let save = scene.find_by_name("save").unwrap();
        assert_eq!(scene.get(save).unwrap().size.x, 40.0);
        assert!(scene.find_by_name("missing").is_none());
    }

    #[test]
    fn query_by_type() {
        let scene = build_query_tree();
        assert_eq!(scene.query_by_type("Group").len(), 3);
        assert_eq!(scene.query_by_type("Block").len(), 1);
        assert!(scene.query_by_type("Text").is_empty());
    }

    #[test]
    fn query_all_predicate() {
        let scene = build_query_tree();
        assert_eq!(scene.query_all(|d| !d.renders).len(), 1);
    }

    #[test]
    fn nodes_in_region() {
        let scene = build_query_tree();
        let hits = scene.nodes_in(Bounds::new(10.0, 10.0, 5.0, 5.0));
        let names: Vec<_> = hits.iter().map(|&id| scene.get(id).unwrap().name.as_str()).collect();
        assert_eq!(names, vec!["root", "sidebar", "save"]);
        // Hidden drawables are never reported.
        let right = scene.nodes_in(Bounds::new(100.0, 100.0, 5.0, 5.0));
        assert_eq!(right.len(), 1);
    }

    #[test]
    fn nodes_in_empty_scene() {
        assert!(Scene::new().nodes_in(Bounds::new(0.0, 0.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn debug_tree_dump() {
        let scene = build_query_tree();
        let root = scene.root().unwrap();
        insta::assert_snapshot!(scene.debug_tree(root), @r"
        root [Group] at (0, 0) size 200x200
          sidebar [Group] at (0, 0) size 50x200
            save [Block] at (5, 5) size 40x20
          main [Group] at (50, 0) size 150x200 hidden
        ");
    }
}
