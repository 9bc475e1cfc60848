use serde_json::{json, Value};
use tokio::sync::RwLock;

/// Process-lifetime options list, seeded at startup.
/// Entries are stored exactly as posted.
#[derive(Debug, Default)]
pub struct OptionsStore {
    entries: RwLock<Vec<Value>>,
}

impl OptionsStore {
    pub fn new(seed: Vec<Value>) -> Self {
        Self {
            entries: RwLock::new(seed),
        }
    }

    pub fn with_default_seed() -> Self {
        Self::new(vec![json!({
            "index": "NIFTY",
            "strike": 23000,
            "type": "CALL",
            "expiry": "2025-11-14"
        })])
    }

    pub async fn list(&self) -> Vec<Value> {
        self.entries.read().await.clone()
    }

    pub async fn add(&self, entry: Value) -> usize {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_store() {
        let store = OptionsStore::with_default_seed();
        let entries = store.list().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["index"], "NIFTY");
        assert_eq!(entries[0]["type"], "CALL");
        assert_eq!(entries[0]["strike"].to_string(), "23000");
    }

    #[tokio::test]
    async fn test_add_keeps_body_unchanged() {
        let store = OptionsStore::default();
        let put = json!({"index": "BANKNIFTY", "strike": 48000, "type": "PUT", "lot": 15});

        assert_eq!(store.add(put.clone()).await, 1);
        assert_eq!(store.add(json!("free text")).await, 2);
        assert_eq!(store.list().await, vec![put, json!("free text")]);
    }
}
