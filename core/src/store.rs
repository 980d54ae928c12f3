//! Raw field values with change subscriptions.
//!
//! Listeners run synchronously after each change, in subscription order.

use std::collections::HashMap;

use crate::path::FieldPath;

pub type Listener = Box<dyn FnMut(&FieldPath, &str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Which changes a listener hears about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Field(FieldPath),
    All,
}

impl Watch {
    fn matches(&self, path: &FieldPath) -> bool {
        match self {
            Watch::Field(watched) => watched == path,
            Watch::All => true,
        }
    }
}

struct Subscription {
    id: SubscriptionId,
    watch: Watch,
    listener: Listener,
}

#[derive(Default)]
pub struct FieldStore {
    values: HashMap<FieldPath, String>,
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, path: &FieldPath) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    /// Store `raw` under `path` without notifying listeners.
    pub fn seed(&mut self, path: FieldPath, raw: impl Into<String>) {
        self.values.insert(path, raw.into());
    }

    pub fn set_value(&mut self, path: FieldPath, raw: impl Into<String>) {
        let raw = raw.into();
        self.values.insert(path, raw.clone());
        self.notify(&path, &raw);
    }

    /// Tell listeners about a change to a value this store does not hold.
    pub fn notify(&mut self, path: &FieldPath, raw: &str) {
        for sub in self.subscriptions.iter_mut().filter(|s| s.watch.matches(path)) {
            (sub.listener)(path, raw);
        }
    }

    pub fn subscribe<F>(&mut self, watch: Watch, listener: F) -> SubscriptionId
    where
        F: FnMut(&FieldPath, &str) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            watch,
            listener: Box::new(listener),
        });
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }
}

impl std::fmt::Debug for FieldStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldStore")
            .field("values", &self.values)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<(String, String)>>>, impl FnMut(&FieldPath, &str)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |path: &FieldPath, raw: &str| {
            sink.borrow_mut().push((path.to_string(), raw.to_string()))
        })
    }

    #[test]
    fn set_value_is_readable() {
        let mut store = FieldStore::new();
        store.set_value(FieldPath::Username, "Batman");
        assert_eq!(store.value(&FieldPath::Username), Some("Batman"));
        assert_eq!(store.value(&FieldPath::Email), None);
    }

    #[test]
    fn field_watcher_only_hears_its_field() {
        let mut store = FieldStore::new();
        let (seen, listener) = recorder();
        store.subscribe(Watch::Field(FieldPath::Username), listener);

        store.set_value(FieldPath::Email, "a@b.c");
        store.set_value(FieldPath::Username, "Robin");

        assert_eq!(*seen.borrow(), vec![("username".to_string(), "Robin".to_string())]);
    }

    #[test]
    fn seed_does_not_notify() {
        let mut store = FieldStore::new();
        let (seen, listener) = recorder();
        store.subscribe(Watch::All, listener);
        store.seed(FieldPath::Channel, "news");
        assert!(seen.borrow().is_empty());
        assert_eq!(store.value(&FieldPath::Channel), Some("news"));
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = FieldStore::new();
        let (seen, listener) = recorder();
        let id = store.subscribe(Watch::All, listener);
        store.set_value(FieldPath::Age, "1");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_value(FieldPath::Age, "2");
        assert_eq!(seen.borrow().len(), 1);
    }
}
