//! Canonical node representation.
//!
//! A node's kind is carried by its [`Binding`] variant, so it cannot change
//! after the node is created: updates only ever touch the payload of the
//! variant the node was created with.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    model::{CatalogItem, EventRef, GatewayRef, TaskRef},
    utils,
};

/// node id
pub type NodeId = String;

/// Kind of workflow element a node stands for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Task,
    Gateway,
    Event,
}

impl NodeKind {
    /// Label given to a freshly dropped node, e.g. `Task Node`.
    pub fn default_label(&self) -> String {
        match self {
            NodeKind::Task => "Task Node".to_string(),
            NodeKind::Gateway => "Gateway Node".to_string(),
            NodeKind::Event => "Event Node".to_string(),
        }
    }
}

/// Canvas coordinate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    #[serde(serialize_with = "utils::json::serialize_number")]
    pub x: f64,
    #[serde(serialize_with = "utils::json::serialize_number")]
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

/// Event configuration of an event node.
///
/// Starts empty; picking an entry of the event catalog fills `key`, `name`
/// and `event_type`, the name and duration fields are typed in by hand.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", alias = "eventType", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// ISO-8601 duration, e.g. `PT1M`
    #[serde(rename = "timeDuration", default, skip_serializing_if = "Option::is_none")]
    pub time_duration: Option<String>,
}

impl EventBinding {
    /// Binding pre-filled from an event catalog entry.
    pub fn from_catalog(item: &EventRef) -> Self {
        Self {
            key: Some(item.key.clone()),
            name: Some(item.name.clone()),
            event_type: item.item_type.clone(),
            event_name: None,
            time_duration: None,
        }
    }

    pub fn with_event_name(
        mut self,
        event_name: impl Into<String>,
    ) -> Self {
        self.event_name = Some(event_name.into());
        self
    }

    pub fn with_time_duration(
        mut self,
        time_duration: impl Into<String>,
    ) -> Self {
        self.time_duration = Some(time_duration.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.name.is_none() && self.event_type.is_none() && self.event_name.is_none() && self.time_duration.is_none()
    }
}

/// Kind specific domain data of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Task(Option<TaskRef>),
    Gateway(Option<GatewayRef>),
    Event(EventBinding),
}

impl Binding {
    /// Unconfigured binding for a node kind.
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Task => Binding::Task(None),
            NodeKind::Gateway => Binding::Gateway(None),
            NodeKind::Event => Binding::Event(EventBinding::default()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Binding::Task(_) => NodeKind::Task,
            Binding::Gateway(_) => NodeKind::Gateway,
            Binding::Event(_) => NodeKind::Event,
        }
    }

    pub fn task(&self) -> Option<&TaskRef> {
        match self {
            Binding::Task(task) => task.as_ref(),
            _ => None,
        }
    }

    pub fn gateway(&self) -> Option<&GatewayRef> {
        match self {
            Binding::Gateway(gateway) => gateway.as_ref(),
            _ => None,
        }
    }

    pub fn event(&self) -> Option<&EventBinding> {
        match self {
            Binding::Event(event) => Some(event),
            _ => None,
        }
    }

    /// Merge the fields of `patch` that belong to this binding's kind.
    fn merge(
        &mut self,
        patch: &NodeDataPatch,
    ) {
        match self {
            Binding::Task(task) => {
                if let Some(selected) = &patch.selected_task {
                    *task = selected.clone();
                }
            }
            Binding::Gateway(gateway) => {
                if let Some(selected) = &patch.selected_gateway {
                    *gateway = selected.clone();
                }
            }
            Binding::Event(event) => {
                if let Some(updated) = &patch.event {
                    *event = updated.clone();
                }
            }
        }
    }
}

/// Partial update of a node's data, as produced by the properties panel.
///
/// An outer `None` leaves the field untouched; `Some(None)` clears a
/// selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDataPatch {
    pub selected_task: Option<Option<TaskRef>>,
    pub selected_gateway: Option<Option<GatewayRef>>,
    pub event: Option<EventBinding>,
}

impl NodeDataPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(
        mut self,
        task: Option<TaskRef>,
    ) -> Self {
        self.selected_task = Some(task);
        self
    }

    pub fn gateway(
        mut self,
        gateway: Option<GatewayRef>,
    ) -> Self {
        self.selected_gateway = Some(gateway);
        self
    }

    pub fn event(
        mut self,
        event: EventBinding,
    ) -> Self {
        self.event = Some(event);
        self
    }

    /// Label implied by the patch: selected task name first, then selected gateway name.
    pub fn label(&self) -> Option<&str> {
        fn named(item: &Option<Option<CatalogItem>>) -> Option<&str> {
            item.as_ref().and_then(|i| i.as_ref()).map(|i| i.name.as_str()).filter(|n| !n.is_empty())
        }

        named(&self.selected_task).or_else(|| named(&self.selected_gateway))
    }
}

/// One workflow element on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// node id
    pub id: NodeId,
    /// canvas position
    pub position: Position,
    /// display label
    pub label: String,
    /// canvas selection state, never exported
    pub selected: bool,
    binding: Binding,
}

impl Node {
    /// Create an unconfigured node with the default label of its kind.
    pub fn new(
        id: impl Into<NodeId>,
        kind: NodeKind,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            label: kind.default_label(),
            selected: false,
            binding: Binding::empty(kind),
        }
    }

    pub(crate) fn with_parts(
        id: NodeId,
        position: Position,
        label: String,
        binding: Binding,
    ) -> Self {
        Self {
            id,
            position,
            label,
            selected: false,
            binding,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.binding.kind()
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Merge `patch` into the binding and recompute the label.
    pub fn apply_patch(
        &mut self,
        patch: &NodeDataPatch,
    ) {
        self.binding.merge(patch);

        if let Binding::Event(EventBinding {
            time_duration: Some(duration),
            ..
        }) = &self.binding
        {
            if !utils::duration::is_iso8601_duration(duration) {
                warn!(node_id = %self.id, duration = %duration, "event time duration is not an ISO-8601 duration");
            }
        }

        if let Some(label) = patch.label() {
            self.label = label.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        assert_eq!(NodeKind::Task.default_label(), "Task Node");
        assert_eq!(NodeKind::Gateway.default_label(), "Gateway Node");
        assert_eq!(NodeKind::Event.default_label(), "Event Node");
    }

    #[test]
    fn test_kind_follows_binding() {
        let node = Node::new("node_0", NodeKind::Gateway, Position::default());
        assert_eq!(node.kind(), NodeKind::Gateway);
        assert_eq!(node.binding(), &Binding::Gateway(None));
    }

    #[test]
    fn test_patch_task_takes_label_priority() {
        let mut node = Node::new("node_0", NodeKind::Task, Position::default());
        let patch = NodeDataPatch::new().task(Some(CatalogItem::new("t1", "Review", "userTask"))).gateway(Some(CatalogItem::new("g1", "Route", "exclusive")));
        node.apply_patch(&patch);
        assert_eq!(node.label, "Review");
        assert_eq!(node.binding().task().map(|t| t.key.as_str()), Some("t1"));
        assert_eq!(node.kind(), NodeKind::Task);
    }

    #[test]
    fn test_patch_label_skips_blank_names() {
        assert_eq!(NodeDataPatch::new().label(), None);
        assert_eq!(NodeDataPatch::new().task(None).label(), None);
        let patch = NodeDataPatch::new().task(Some(CatalogItem::new("t1", "", "userTask"))).gateway(Some(CatalogItem::new("g1", "Route", "exclusive")));
        assert_eq!(patch.label(), Some("Route"));
    }

    #[test]
    fn test_patch_gateway_label_when_no_task() {
        let mut node = Node::new("node_1", NodeKind::Gateway, Position::default());
        node.apply_patch(&NodeDataPatch::new().task(None).gateway(Some(CatalogItem::new("g1", "Route", "exclusive"))));
        assert_eq!(node.label, "Route");
        assert_eq!(node.binding().gateway().and_then(|g| g.gateway_type()), Some(crate::model::GatewayType::Exclusive));
    }

    #[test]
    fn test_patch_keeps_previous_label() {
        let mut node = Node::new("node_2", NodeKind::Event, Position::default());
        node.label = "Timer".to_string();
        let event = EventBinding::from_catalog(&CatalogItem::new("e1", "Timer", "timer")).with_time_duration("PT1M");
        node.apply_patch(&NodeDataPatch::new().event(event.clone()));
        assert_eq!(node.label, "Timer");
        assert_eq!(node.binding().event(), Some(&event));
    }

    #[test]
    fn test_patch_ignores_empty_names() {
        let mut node = Node::new("node_3", NodeKind::Task, Position::default());
        node.apply_patch(&NodeDataPatch::new().task(Some(CatalogItem::new("t1", "", "userTask"))));
        assert_eq!(node.label, "Task Node");
    }

    #[test]
    fn test_patch_clears_selection() {
        let mut node = Node::new("node_4", NodeKind::Task, Position::default());
        node.apply_patch(&NodeDataPatch::new().task(Some(CatalogItem::new("t1", "Review", "userTask"))));
        node.apply_patch(&NodeDataPatch::new().task(None));
        assert_eq!(node.binding(), &Binding::Task(None));
        assert_eq!(node.label, "Review");
    }

    #[test]
    fn test_event_binding_accepts_wire_key() {
        let event: EventBinding = serde_json::from_str(r#"{"eventType":"timer","eventName":"wait","timeDuration":"PT5M"}"#).unwrap();
        assert_eq!(event.event_type.as_deref(), Some("timer"));
        assert!(!event.is_empty());
        assert!(EventBinding::default().is_empty());
    }
}
