use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Host form contract: per-field values, change revisions and field errors.
///
/// `revision` stands in for a change subscription: it increases every time a
/// field's value is written, and [`FieldWatch`] turns it into "changed since I
/// last looked".
pub trait FieldBinding {
    fn contains(&self, name: &str) -> bool;

    fn value(&self, name: &str) -> Option<String>;

    fn set_value(&mut self, name: &str, value: &str);

    fn revision(&self, name: &str) -> u64;

    fn set_error(&mut self, name: &str, message: &str);

    fn clear_error(&mut self, name: &str);

    fn error(&self, name: &str) -> Option<String>;

    fn has_errors(&self) -> bool;
}

/// Shared handle passed to every control mounted on the same form.
pub type BindingHandle = Rc<RefCell<dyn FieldBinding>>;

/// Remembers the last revision of one field seen by a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWatch {
    name: String,
    seen: u64,
}

impl FieldWatch {
    pub fn new(binding: &dyn FieldBinding, name: impl Into<String>) -> Self {
        let name = name.into();
        let seen = binding.revision(&name);
        Self { name, seen }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the field was written since the previous call.
    pub fn changed(&mut self, binding: &dyn FieldBinding) -> bool {
        let current = binding.revision(&self.name);
        if current == self.seen {
            false
        } else {
            self.seen = current;
            true
        }
    }

    /// Marks the current revision as seen without reacting to it.
    pub fn sync(&mut self, binding: &dyn FieldBinding) {
        self.seen = binding.revision(&self.name);
    }
}

#[derive(Debug, Clone, Default)]
struct FieldSlot {
    value: String,
    revision: u64,
    error: Option<String>,
}

/// In-memory [`FieldBinding`] with explicitly registered fields.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    fields: BTreeMap<String, FieldSlot>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with an initial value; re-registering resets it.
    pub fn register(&mut self, name: impl Into<String>, initial: impl Into<String>) {
        self.fields.insert(
            name.into(),
            FieldSlot {
                value: initial.into(),
                ..FieldSlot::default()
            },
        );
    }

    pub fn with_field(mut self, name: impl Into<String>, initial: impl Into<String>) -> Self {
        self.register(name, initial);
        self
    }

    pub fn into_handle(self) -> Rc<RefCell<FormStore>> {
        Rc::new(RefCell::new(self))
    }

    /// Field names paired with their current error message.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(name, slot)| slot.error.clone().map(|message| (name.clone(), message)))
            .collect()
    }
}

impl FieldBinding for FormStore {
    fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn value(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(|slot| slot.value.clone())
    }

    fn set_value(&mut self, name: &str, value: &str) {
        match self.fields.get_mut(name) {
            Some(slot) => {
                slot.value = value.to_string();
                slot.revision += 1;
            }
            None => {
                tracing::warn!(field = name, "write to unregistered field ignored");
            }
        }
    }

    fn revision(&self, name: &str) -> u64 {
        self.fields.get(name).map_or(0, |slot| slot.revision)
    }

    fn set_error(&mut self, name: &str, message: &str) {
        if let Some(slot) = self.fields.get_mut(name) {
            slot.error = Some(message.to_string());
        }
    }

    fn clear_error(&mut self, name: &str) {
        if let Some(slot) = self.fields.get_mut(name) {
            slot.error = None;
        }
    }

    fn error(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(|slot| slot.error.clone())
    }

    fn has_errors(&self) -> bool {
        self.fields.values().any(|slot| slot.error.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_bump_revision() {
        let mut store = FormStore::new().with_field("a", "");
        assert_eq!(store.revision("a"), 0);
        store.set_value("a", "x");
        store.set_value("a", "x");
        assert_eq!(store.revision("a"), 2);
        assert_eq!(store.value("a").as_deref(), Some("x"));
    }

    #[test]
    fn unregistered_fields_stay_unregistered() {
        let mut store = FormStore::new();
        store.set_value("ghost", "boo");
        store.set_error("ghost", "nope");
        assert!(!store.contains("ghost"));
        assert!(!store.has_errors());
    }

    #[test]
    fn watch_reports_each_change_once() {
        let mut store = FormStore::new().with_field("a", "");
        let mut watch = FieldWatch::new(&store, "a");
        assert!(!watch.changed(&store));
        store.set_value("a", "1");
        assert!(watch.changed(&store));
        assert!(!watch.changed(&store));
        store.set_value("a", "2");
        watch.sync(&store);
        assert!(!watch.changed(&store));
    }

    #[test]
    fn errors_are_listed_by_field() {
        let mut store = FormStore::new().with_field("a", "").with_field("b", "");
        store.set_error("b", "bad");
        assert!(store.has_errors());
        assert_eq!(store.errors(), vec![("b".to_string(), "bad".to_string())]);
        store.clear_error("b");
        assert!(!store.has_errors());
    }
}
