use tokio::sync::Mutex;

/// Holds the value of one key at a time.
///
/// A lookup of any other key misses; storing a value replaces whatever the
/// slot held before.
pub struct SingleSlotCache<K, V> {
    slot: Mutex<Option<(K, V)>>,
}

impl<K, V> SingleSlotCache<K, V>
where
    K: PartialEq,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let slot = self.slot.lock().await;
        match slot.as_ref() {
            Some((cached_key, value)) if cached_key == key => Some(value.clone()),
            _ => None,
        }
    }

    /// The cached value, whatever key it belongs to.
    pub async fn value(&self) -> Option<V> {
        let slot = self.slot.lock().await;
        slot.as_ref().map(|(_, value)| value.clone())
    }

    pub async fn put(&self, key: K, value: V) {
        *self.slot.lock().await = Some((key, value));
    }
}

impl<K, V> Default for SingleSlotCache<K, V>
where
    K: PartialEq,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
