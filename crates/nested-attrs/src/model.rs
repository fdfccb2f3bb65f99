//! In-memory attribute host with Backbone-style change events.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::accessor::{AttributeHost, Attributes, SetOptions};

/// A notification emitted by [`Model`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelEvent {
    /// `change:<path>`. `value` is `None` after removal.
    Changed { path: String, value: Option<Value> },
    /// `change`, once per batch.
    Change,
}

impl ModelEvent {
    /// The name listeners subscribe to.
    pub fn name(&self) -> String {
        match self {
            ModelEvent::Changed { path, .. } => format!("change:{path}"),
            ModelEvent::Change => "change".to_string(),
        }
    }
}

type Listener = Box<dyn FnMut(&ModelEvent)>;

/// Owns an attribute tree and records the events fired against it.
///
/// Every event is appended to an internal log (see [`Model::drain_events`])
/// and passed to the listeners registered for its name.
///
/// # Example
///
/// ```
/// use nested_attrs::{Model, ModelEvent, NestedAttributes, SetOptions};
/// use serde_json::json;
///
/// let mut model = Model::new();
/// model.set_one("a.b", 5, &SetOptions::default()).unwrap();
///
/// let names: Vec<String> = model.drain_events().iter().map(ModelEvent::name).collect();
/// assert_eq!(names, ["change:a", "change:a.b", "change"]);
/// ```
#[derive(Default)]
pub struct Model {
    attributes: Attributes,
    listeners: Vec<(String, Listener)>,
    events: Vec<ModelEvent>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Build from a JSON value; `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(attributes) => Some(Self::with_attributes(attributes)),
            _ => None,
        }
    }

    /// Subscribe to `event` (`"change"` or `"change:<path>"`).
    pub fn on(&mut self, event: impl Into<String>, listener: impl FnMut(&ModelEvent) + 'static) {
        let listener: Listener = Box::new(listener);
        self.listeners.push((event.into(), listener));
    }

    /// Replace every attribute at once.
    pub fn reset(&mut self, attributes: Attributes, options: &SetOptions) {
        self.replace_attributes(attributes, options);
        self.attributes_changed(options);
    }

    pub fn events(&self) -> &[ModelEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.attributes)
    }

    fn emit(&mut self, event: ModelEvent) {
        let name = event.name();
        trace!(event = %name, "emit");
        for (subscribed, listener) in &mut self.listeners {
            if *subscribed == name {
                listener(&event);
            }
        }
        self.events.push(event);
    }
}

impl AttributeHost for Model {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn replace_attributes(&mut self, attrs: Attributes, options: &SetOptions) {
        let previous = std::mem::replace(&mut self.attributes, attrs);
        if options.silent {
            return;
        }

        let mut changed: Vec<ModelEvent> = Vec::new();
        for (key, value) in &self.attributes {
            if previous.get(key) != Some(value) {
                changed.push(ModelEvent::Changed {
                    path: key.clone(),
                    value: Some(value.clone()),
                });
            }
        }
        for key in previous.keys() {
            if !self.attributes.contains_key(key) {
                changed.push(ModelEvent::Changed {
                    path: key.clone(),
                    value: None,
                });
            }
        }
        for event in changed {
            self.emit(event);
        }
    }

    fn unset_attribute(&mut self, key: &str, options: &SetOptions) {
        if self.attributes.shift_remove(key).is_some() && !options.silent {
            self.emit(ModelEvent::Changed {
                path: key.to_string(),
                value: None,
            });
        }
    }

    fn path_changed(&mut self, path: &str, value: Option<&Value>) {
        self.emit(ModelEvent::Changed {
            path: path.to_string(),
            value: value.cloned(),
        });
    }

    fn attributes_changed(&mut self, options: &SetOptions) {
        if !options.silent {
            self.emit(ModelEvent::Change);
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("attributes", &self.attributes)
            .field("listeners", &self.listeners.len())
            .field("events", &self.events)
            .finish()
    }
}
