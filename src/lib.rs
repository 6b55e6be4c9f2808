//! # FlowCanvas
//!
//! FlowCanvas is the graph-editing core of a visual business-process workflow builder.
//! It keeps the canonical node/edge model behind a drag-and-drop canvas and turns
//! user gestures into consistent graph mutations.
//!
//! ## Core Features
//!
//! - **Typed Graph Model**: Task, Gateway and Event nodes with catalog bindings, default and condition edges
//! - **Mutation Engine**: Cascading deletes, edge kind derivation and label recomputation
//! - **Linear Undo**: Bounded snapshot history taken before every guarded mutation
//! - **Import/Export**: Schema-checked loading of stored workflows and a stable wire document for saving
//! - **Backend Client**: Async catalog providers and workflow saving over HTTP
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowcanvas::{EditorBuilder, graph::{NodeKind, Position}};
//!
//! let mut editor = EditorBuilder::new().client_id("client61").build();
//!
//! let task = editor.add_node(NodeKind::Task, Position::new(0.0, 0.0));
//! let gateway = editor.add_node(NodeKind::Gateway, Position::new(100.0, 0.0));
//! editor.add_edge(&task, &gateway);
//!
//! editor.set_workflow_name("onboarding");
//! let json = editor.export().to_json()?;
//! ```

mod builder;
pub mod client;
pub mod common;
mod config;
pub mod editor;
mod error;
pub mod graph;
mod model;
mod utils;

pub use builder::EditorBuilder;
pub use config::{ApiConfig, Config, EditorConfig};
pub use editor::Editor;
pub use error::FlowCanvasError;
pub use model::*;

/// Result type alias for FlowCanvas operations.
pub type Result<T> = std::result::Result<T, FlowCanvasError>;
