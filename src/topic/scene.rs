//! Visualization payloads for the built-in renderers
//!
//! A [`Scene`] is the payload attached to each step of a topic. The playback
//! controller passes it through untouched; only the scene pane reads it.

use serde::Deserialize;

/// What the visualization pane should draw for one step
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scene {
    /// Runtime queues around a JavaScript-style event loop
    EventLoop {
        #[serde(default)]
        call_stack: Vec<String>,
        #[serde(default)]
        web_apis: Vec<String>,
        #[serde(default)]
        microtasks: Vec<String>,
        #[serde(default)]
        macrotasks: Vec<String>,
        #[serde(default)]
        console: Vec<String>,
    },

    /// Function frames with their local bindings, innermost last
    CallStack {
        #[serde(default)]
        frames: Vec<StackFrame>,
        #[serde(default)]
        console: Vec<String>,
    },

    /// A flattened tree (pre-order, with depth) and the patches derived so far
    Tree {
        #[serde(default)]
        nodes: Vec<TreeNode>,
        #[serde(default)]
        patches: Vec<String>,
    },

    /// Client-side routing: address bar, history, matched routes, outlet
    Route {
        url: String,
        #[serde(default)]
        history: Vec<String>,
        #[serde(default)]
        matched: Vec<String>,
        #[serde(default)]
        rendered: Vec<String>,
    },
}

impl Scene {
    /// Short label for the pane title
    pub fn label(&self) -> &'static str {
        match self {
            Scene::EventLoop { .. } => "Event Loop",
            Scene::CallStack { .. } => "Call Stack",
            Scene::Tree { .. } => "Tree",
            Scene::Route { .. } => "Router",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StackFrame {
    pub name: String,
    #[serde(default)]
    pub locals: Vec<Binding>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Binding {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeNode {
    pub label: String,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub status: NodeStatus,
}

/// How a node relates to the previous render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    #[default]
    Unchanged,
    Added,
    Removed,
    Updated,
    Visiting,
}
