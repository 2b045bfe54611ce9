use std::collections::HashMap;

use crate::error::NotifyError;

/// Maps template names to the host's rendering strategy.
#[derive(Debug, Clone)]
pub struct TemplateRegistry<T> {
    templates: HashMap<String, T>,
}

impl<T> Default for TemplateRegistry<T> {
    fn default() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }
}

impl<T> TemplateRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, template: T) -> &mut Self {
        self.templates.insert(name.into(), template);
        self
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, template: T) -> Self {
        self.register(name, template);
        self
    }

    pub fn get(&self, name: &str) -> Result<&T, NotifyError> {
        self.templates
            .get(name)
            .ok_or_else(|| NotifyError::TemplateNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_is_an_error() {
        let registry: TemplateRegistry<u8> = TemplateRegistry::new().with("notificationTemplate", 1);
        assert_eq!(registry.get("notificationTemplate"), Ok(&1));
        assert_eq!(
            registry.get("missing"),
            Err(NotifyError::TemplateNotFound("missing".to_string()))
        );
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = TemplateRegistry::new();
        registry.register("a", "first").register("b", "second");
        registry.register("a", "third");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a"), Ok(&"third"));
        assert_eq!(registry.names(), vec!["a", "b"]);
    }
}
