//! Collaborators that feed the editor with catalogs and persist its output.

mod http;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    Result,
    editor::Editor,
    model::{ConditionRef, EventRef, GatewayRef, TaskRef, WorkflowDocument},
};

pub use http::{HttpWorkflowClient, SaveOutcome, interpret_save_response};

/// Read side of the backend.
///
/// Implementations never fail: errors are logged and reported as an empty
/// result so the pickers keep working.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Names of every stored workflow.
    async fn list_workflows(&self) -> Vec<String>;

    /// Raw JSON of one stored workflow, `None` when it could not be fetched.
    ///
    /// The value is handed to [`Editor::load`] as is, so any accepted shape works.
    async fn fetch_workflow(
        &self,
        name: &str,
    ) -> Option<Value>;

    async fn list_task_catalog(&self) -> Vec<TaskRef>;

    async fn list_gateway_catalog(&self) -> Vec<GatewayRef>;

    async fn list_event_catalog(&self) -> Vec<EventRef>;

    async fn list_condition_catalog(&self) -> Vec<ConditionRef>;
}

/// Write side of the backend.
#[async_trait]
pub trait WorkflowSink: Send + Sync {
    /// Post the document to the workflow generation endpoint.
    ///
    /// # Returns
    ///
    /// The decoded response body for any 2xx status, otherwise an error.
    async fn save_workflow(
        &self,
        document: &WorkflowDocument,
    ) -> Result<SaveOutcome>;
}

/// Everything the properties panel and the condition picker show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelCatalogs {
    pub tasks: Vec<TaskRef>,
    pub gateways: Vec<GatewayRef>,
    pub events: Vec<EventRef>,
    pub conditions: Vec<ConditionRef>,
}

/// Fetch the four catalogs concurrently.
pub async fn load_panel_catalogs(provider: &dyn CatalogProvider) -> PanelCatalogs {
    let (tasks, gateways, events, conditions) = futures::join!(
        provider.list_task_catalog(),
        provider.list_gateway_catalog(),
        provider.list_event_catalog(),
        provider.list_condition_catalog(),
    );

    PanelCatalogs {
        tasks,
        gateways,
        events,
        conditions,
    }
}

/// Export the session and hand it to `sink`.
///
/// The document is checked for a client id and a workflow name first. The
/// editor is never touched, so a failed save can simply be retried.
pub async fn save_session(
    editor: &Editor,
    sink: &dyn WorkflowSink,
) -> Result<SaveOutcome> {
    let document = editor.export();
    document.validate_for_save()?;

    match sink.save_workflow(&document).await {
        Ok(outcome) => {
            info!(workflow = %document.workflow_name, "workflow saved");
            Ok(outcome)
        }
        Err(err) => {
            error!(workflow = %document.workflow_name, "error saving workflow: {}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::{
        EditorBuilder, FlowCanvasError,
        graph::{NodeKind, Position},
        model::CatalogItem,
    };

    struct StaticProvider;

    #[async_trait]
    impl CatalogProvider for StaticProvider {
        async fn list_workflows(&self) -> Vec<String> {
            vec!["onboarding".to_string()]
        }

        async fn fetch_workflow(
            &self,
            _name: &str,
        ) -> Option<Value> {
            Some(json!({"nodes": [{"id": "node_2", "type": "gateway"}], "edges": []}))
        }

        async fn list_task_catalog(&self) -> Vec<TaskRef> {
            vec![CatalogItem::new("t1", "Review", "userTask")]
        }

        async fn list_gateway_catalog(&self) -> Vec<GatewayRef> {
            vec![CatalogItem::new("g1", "Route", "exclusive")]
        }

        async fn list_event_catalog(&self) -> Vec<EventRef> {
            Vec::new()
        }

        async fn list_condition_catalog(&self) -> Vec<ConditionRef> {
            vec![ConditionRef {
                condition_key: "c1".into(),
                ..Default::default()
            }]
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        saved: Mutex<Vec<WorkflowDocument>>,
        fail: bool,
    }

    #[async_trait]
    impl WorkflowSink for RecordingSink {
        async fn save_workflow(
            &self,
            document: &WorkflowDocument,
        ) -> Result<SaveOutcome> {
            if self.fail {
                return Err(FlowCanvasError::Save {
                    status: 500,
                    message: "boom".into(),
                });
            }
            self.saved.lock().unwrap().push(document.clone());
            Ok(SaveOutcome::Text("ok".into()))
        }
    }

    #[tokio::test]
    async fn test_load_panel_catalogs() {
        let catalogs = load_panel_catalogs(&StaticProvider).await;
        assert_eq!(catalogs.tasks.len(), 1);
        assert_eq!(catalogs.gateways[0].key, "g1");
        assert!(catalogs.events.is_empty());
        assert_eq!(catalogs.conditions[0].condition_key, "c1");
    }

    #[tokio::test]
    async fn test_fetched_workflow_loads_into_editor() {
        let mut editor = EditorBuilder::new().build();
        let value = StaticProvider.fetch_workflow("onboarding").await;
        editor.load(value.as_ref()).unwrap();
        assert_eq!(editor.add_node(NodeKind::Task, Position::default()), "node_3");
    }

    #[tokio::test]
    async fn test_save_session_requires_name() {
        let sink = RecordingSink::default();
        let editor = EditorBuilder::new().build();
        let err = save_session(&editor, &sink).await.unwrap_err();
        assert_eq!(err, FlowCanvasError::Validation("Client ID and Workflow Name are required.".into()));
        assert!(sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_session_posts_export() {
        let sink = RecordingSink::default();
        let mut editor = EditorBuilder::new().build();
        editor.add_node(NodeKind::Task, Position::default());
        editor.set_workflow_name("onboarding");

        assert_eq!(save_session(&editor, &sink).await.unwrap(), SaveOutcome::Text("ok".into()));
        assert_eq!(sink.saved.lock().unwrap()[0], editor.export());
    }

    #[tokio::test]
    async fn test_failed_save_leaves_editor_untouched() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut editor = EditorBuilder::new().build();
        editor.add_node(NodeKind::Task, Position::default());
        editor.set_workflow_name("onboarding");
        let graph = editor.graph().clone();

        let err = save_session(&editor, &sink).await.unwrap_err();
        assert!(matches!(err, FlowCanvasError::Save { status: 500, .. }));
        assert_eq!(editor.graph(), &graph);
        assert!(editor.is_modified());
    }
}
