use crate::{EditorConfig, editor::Editor};

pub struct EditorBuilder {
    client_id: String,
    history_capacity: usize,
    command_queue_capacity: usize,
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            history_capacity: config.history_capacity,
            command_queue_capacity: config.command_queue_capacity,
        }
    }

    pub fn client_id(
        mut self,
        client_id: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn history_capacity(
        mut self,
        n: usize,
    ) -> Self {
        self.history_capacity = n;
        self
    }

    pub fn command_queue_capacity(
        mut self,
        n: usize,
    ) -> Self {
        self.command_queue_capacity = n;
        self
    }

    pub fn build(&self) -> Editor {
        Editor::new(self.client_id.clone(), self.history_capacity, self.command_queue_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, graph::NodeKind, graph::Position};

    #[test]
    fn test_builder_defaults() {
        let editor = EditorBuilder::new().build();
        assert_eq!(editor.client_id(), "client61");
        assert_eq!(editor.history().capacity(), 50);
        assert!(editor.graph().is_empty());
    }

    #[test]
    fn test_builder_from_config() {
        let config = Config::load_from_str(
            r#"
            [editor]
            client_id = "acme"
            history_capacity = 2
            "#,
        )
        .unwrap();
        let mut editor = EditorBuilder::from_config(&config.editor).build();
        assert_eq!(editor.client_id(), "acme");

        for _ in 0..5 {
            editor.add_node(NodeKind::Task, Position::default());
        }
        assert_eq!(editor.history().len(), 2);
    }
}
