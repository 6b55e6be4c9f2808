mod catalog;
mod edge;
pub mod export;
pub mod import;
mod node;
mod workflow;

pub use catalog::{CatalogItem, ConditionRef, EventRef, GatewayRef, GatewayType, NodeDetails, TaskRef, workflow_names};
pub(crate) use catalog::ConditionList;
pub use edge::EdgeModel;
pub use import::{ImportShape, LoadedWorkflow};
pub use node::{EventModel, NodeDataModel, NodeModel};
pub use workflow::WorkflowDocument;
