//! Индекс графа по именам: nodes (объекты с `name`) и materials.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::{ObjectRef, Value};

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: IndexMap<String, ObjectRef>,
    pub materials: IndexMap<String, ObjectRef>,
}

/// Depth-first обход по `children`. Для nodes побеждает последний с таким именем,
/// для materials: первый.
pub fn build_graph(object: &ObjectRef) -> Graph {
    let mut graph = Graph::default();
    let mut visited = HashSet::new();
    let mut stack = vec![object.clone()];

    while let Some(node) = stack.pop() {
        if !visited.insert(node.id()) {
            continue;
        }

        if let Some(name) = named(&node) {
            graph.nodes.insert(name, node.clone());
        }

        match node.get("material") {
            Value::Object(material) => add_material(&mut graph, material),
            Value::Array(materials) => {
                for material in materials.to_vec() {
                    if let Value::Object(material) = material {
                        add_material(&mut graph, material);
                    }
                }
            }
            _ => {}
        }

        if let Value::Array(children) = node.get("children") {
            // reverse, чтобы pop шёл в порядке children
            for child in children.to_vec().into_iter().rev() {
                if let Value::Object(child) = child {
                    stack.push(child);
                }
            }
        }
    }

    graph
}

fn named(object: &ObjectRef) -> Option<String> {
    object
        .get("name")
        .as_str()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn add_material(graph: &mut Graph, material: ObjectRef) {
    if let Some(name) = named(&material) {
        graph.materials.entry(name).or_insert(material);
    }
}
