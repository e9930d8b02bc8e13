use std::collections::HashMap;

/// String-keyed accumulator that remembers first-seen key order.
pub(crate) struct Tally<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for Tally<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V: Default> Tally<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&mut self, key: &str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}
