use std::collections::HashMap;

/// String-keyed collection that remembers the order in which keys were first
/// inserted. Row order in the source tables drives the output order, so every
/// keyed collection in the pipeline is one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under a new key. Returns `false` and drops `value` when
    /// the key is already present; the first insertion wins.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> bool {
        let key = key.into();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        true
    }

    /// Returns the value for `key`, creating it with `make` on first access.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> T) -> &mut T {
        let position = match self.index.get(key) {
            Some(position) => *position,
            None => {
                let position = self.entries.len();
                self.index.insert(key.to_string(), position);
                self.entries.push((key.to_string(), make()));
                position
            }
        };
        &mut self.entries[position].1
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|position| &self.entries[*position].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.index.get(key) {
            Some(position) => Some(&mut self.entries[*position].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<T> IntoIterator for Registry<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
