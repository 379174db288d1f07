//! Graph of named coordinate frames

use framecrate_core::{Error, Result, RigidTransform, TransformGraph};
use std::collections::{HashMap, HashSet, VecDeque};

/// Stores rigid transforms between named frames.
///
/// Edges are directed for storage but traversed in both directions: a
/// transform from `a` to `b` also answers queries from `b` to `a` through
/// its inverse. Queries between frames that are not directly connected are
/// answered by chaining transforms along the shortest path.
#[derive(Debug, Clone, Default)]
pub struct TransformManager {
    nodes: Vec<String>,
    transforms: HashMap<(String, String), RigidTransform>,
    adjacency: HashMap<String, Vec<String>>,
}

impl TransformManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the transform from frame `from` to frame `to`
    pub fn add_transform(&mut self, from: &str, to: &str, from2to: RigidTransform) {
        if self.transforms.contains_key(&(to.to_string(), from.to_string())) {
            // Keep a single edge per frame pair
            self.transforms.remove(&(to.to_string(), from.to_string()));
        }
        self.add_node(from);
        self.add_node(to);

        let is_new = self
            .transforms
            .insert((from.to_string(), to.to_string()), from2to)
            .is_none();
        if is_new && !self.is_connected_directly(from, to) {
            self.link(from, to);
        }
    }

    /// Remove the transform between two frames. Nodes stay registered.
    pub fn remove_transform(&mut self, from: &str, to: &str) -> bool {
        let removed = self
            .transforms
            .remove(&(from.to_string(), to.to_string()))
            .or_else(|| self.transforms.remove(&(to.to_string(), from.to_string())))
            .is_some();
        if removed {
            self.unlink(from, to);
        }
        removed
    }

    /// Register a frame without connecting it to anything
    pub fn add_frame(&mut self, name: &str) {
        self.add_node(name);
    }

    /// Whether the frame is known
    pub fn has_frame(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Whether a direct transform between the two frames is stored
    pub fn has_transform(&self, from: &str, to: &str) -> bool {
        self.direct_transform(from, to).is_some()
    }

    /// Frames on the shortest path from `from` to `to`, both included
    pub fn path(&self, from: &str, to: &str) -> Result<Vec<String>> {
        for name in [from, to] {
            if !self.has_frame(name) {
                return Err(Error::UnknownFrame(name.to_string()));
            }
        }

        let mut predecessors: HashMap<&str, &str> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![to.to_string()];
                let mut node = to;
                while let Some(&previous) = predecessors.get(node) {
                    path.push(previous.to_string());
                    node = previous;
                }
                path.reverse();
                return Ok(path);
            }
            for next in self.adjacency.get(current).into_iter().flatten() {
                if visited.insert(next.as_str()) {
                    predecessors.insert(next.as_str(), current);
                    queue.push_back(next.as_str());
                }
            }
        }

        Err(Error::UnknownFrame(format!(
            "cannot compute path from '{}' to '{}'",
            from, to
        )))
    }

    fn add_node(&mut self, name: &str) {
        if !self.adjacency.contains_key(name) {
            self.nodes.push(name.to_string());
            self.adjacency.insert(name.to_string(), Vec::new());
        }
    }

    fn is_connected_directly(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.iter().any(|n| n == b))
    }

    fn link(&mut self, a: &str, b: &str) {
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.push(b.to_string());
        }
        if a != b {
            if let Some(neighbors) = self.adjacency.get_mut(b) {
                neighbors.push(a.to_string());
            }
        }
    }

    fn unlink(&mut self, a: &str, b: &str) {
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.retain(|n| n != b);
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.retain(|n| n != a);
        }
    }

    fn direct_transform(&self, from: &str, to: &str) -> Option<RigidTransform> {
        if let Some(t) = self.transforms.get(&(from.to_string(), to.to_string())) {
            return Some(*t);
        }
        self.transforms
            .get(&(to.to_string(), from.to_string()))
            .map(RigidTransform::inverse)
    }
}

impl TransformGraph for TransformManager {
    fn get_transform(&self, from: &str, to: &str) -> Result<RigidTransform> {
        if let Some(t) = self.direct_transform(from, to) {
            return Ok(t);
        }

        let path = self.path(from, to)?;
        let mut from2to = RigidTransform::identity();
        for pair in path.windows(2) {
            let step = self
                .direct_transform(&pair[0], &pair[1])
                .ok_or_else(|| Error::UnknownFrame(format!("'{}' -> '{}'", pair[0], pair[1])))?;
            from2to = step.compose(&from2to);
        }
        Ok(from2to)
    }

    fn nodes(&self) -> Vec<String> {
        self.nodes.clone()
    }
}
