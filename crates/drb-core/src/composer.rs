//! Recursive composition of a config tree into entities.
//!
//! At each key the schema decides: recurse into the sub-mapping with a
//! nested schema, or construct one entity per `(name, attributes)` entry.
//! Keys the schema does not cover are skipped and reported in
//! [`Composition::skipped`].

use std::collections::BTreeMap;

use crate::entity::Entity;
use crate::error::{DrbError, DrbResult};
use crate::schema::{Schema, SchemaNode};
use crate::value::{ConfigTree, Value};
use crate::world::WorldState;

/// One key of an [`EntitySet`].
#[derive(Debug, Clone)]
pub enum EntityNode {
    /// A nested set, from a recursed branch.
    Branch(EntitySet),
    /// Entities by name, from a constructed branch.
    Bucket(BTreeMap<String, Entity>),
}

/// A tree mirroring the config tree, with leaves replaced by entities.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    nodes: BTreeMap<String, EntityNode>,
}

impl EntitySet {
    /// The node stored under `key`.
    pub fn get(&self, key: &str) -> Option<&EntityNode> {
        self.nodes.get(key)
    }

    /// Iterate over top-level keys and nodes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &EntityNode)> {
        self.nodes.iter()
    }

    /// Whether the set has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All entities, depth-first in key order.
    pub fn entities(&self) -> Vec<&Entity> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    /// Total number of entities at any depth.
    pub fn entity_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node| match node {
                EntityNode::Branch(set) => set.entity_count(),
                EntityNode::Bucket(bucket) => bucket.len(),
            })
            .sum()
    }

    /// Find an entity by dotted path, e.g. `items.weapon.sword`.
    pub fn find(&self, path: &str) -> Option<&Entity> {
        let mut set = self;
        let mut segments = path.split('.');
        loop {
            let key = segments.next()?;
            match set.nodes.get(key)? {
                EntityNode::Branch(child) => set = child,
                EntityNode::Bucket(bucket) => {
                    let name = segments.next()?;
                    return match segments.next() {
                        None => bucket.get(name),
                        Some(_) => None,
                    };
                }
            }
        }
    }

    /// Find every entity with this name, at any depth.
    pub fn find_by_name(&self, name: &str) -> Vec<&Entity> {
        self.entities()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Entity>) {
        for node in self.nodes.values() {
            match node {
                EntityNode::Branch(set) => set.collect_into(out),
                EntityNode::Bucket(bucket) => out.extend(bucket.values()),
            }
        }
    }
}

/// The result of [`compose`].
#[derive(Debug, Clone, Default)]
pub struct Composition {
    /// The constructed entities.
    pub entities: EntitySet,
    /// Dotted paths of keys that had no schema directive.
    pub skipped: Vec<String>,
}

/// Walk `tree` under `schema`, constructing entities against `world`.
///
/// Only reads the world. Fails only when a branch the schema covers is not
/// a mapping.
pub fn compose(tree: &ConfigTree, schema: &Schema, world: &WorldState) -> DrbResult<Composition> {
    let mut skipped = Vec::new();
    let entities = compose_at(tree, schema, world, "", &mut skipped)?;
    tracing::debug!(
        entities = entities.entity_count(),
        skipped = skipped.len(),
        "composition finished"
    );
    Ok(Composition { entities, skipped })
}

fn compose_at(
    tree: &BTreeMap<String, Value>,
    schema: &Schema,
    world: &WorldState,
    prefix: &str,
    skipped: &mut Vec<String>,
) -> DrbResult<EntitySet> {
    let mut set = EntitySet::default();

    for (key, value) in tree {
        let path = join(prefix, key);
        let Some(directive) = schema.directive(key) else {
            tracing::debug!(%path, "no schema directive, skipping");
            skipped.push(path);
            continue;
        };
        let branch = value
            .as_map()
            .ok_or_else(|| DrbError::NotAMapping { path: path.clone() })?;

        let node = match directive {
            SchemaNode::Recurse(nested) => {
                EntityNode::Branch(compose_at(branch, nested, world, &path, skipped)?)
            }
            SchemaNode::Construct(variant) => {
                let mut bucket = BTreeMap::new();
                for (name, attributes) in branch {
                    let attributes = attributes.as_map().ok_or_else(|| DrbError::NotAMapping {
                        path: join(&path, name),
                    })?;
                    let entity =
                        Entity::construct(*variant, name.as_str(), attributes, key.as_str(), world);
                    bucket.insert(name.clone(), entity);
                }
                EntityNode::Bucket(bucket)
            }
        };
        set.nodes.insert(key.clone(), node);
    }

    Ok(set)
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
