use crate::error::Error;
use crate::provider::{normalize_name, require_hostname, Record, RecordProvider};
use std::collections::HashMap;
use tokio::sync::RwLock;

const DEFAULT_TTL: i64 = 300;

/// An in-process record provider. Useful for trying out router clients without touching a real
/// hosted zone.
#[derive(Default, Debug)]
pub struct InMemoryProvider {
    records: RwLock<HashMap<String, Record>>,
}

impl InMemoryProvider {
    /// Seed a provider with simple `A` records from `hostname => value` pairs.
    pub fn with_records<I, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let records = records
            .into_iter()
            .map(|(name, value)| {
                let name = name.into();
                let record = Record {
                    name: name.clone(),
                    record_type: "A".to_string(),
                    set_identifier: None,
                    ttl: Some(DEFAULT_TTL),
                    weight: None,
                    value: value.into(),
                };
                (normalize_name(&name), record)
            })
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// The value currently held for `hostname` (if any).
    pub async fn value_of(&self, hostname: &str) -> Option<String> {
        self.records
            .read()
            .await
            .get(&normalize_name(hostname))
            .map(|record| record.value.clone())
    }
}

#[async_trait::async_trait]
impl RecordProvider for InMemoryProvider {
    async fn find_record(&self, hostname: &str) -> Result<Option<Record>, Error> {
        let hostname = require_hostname(hostname)?;
        Ok(self
            .records
            .read()
            .await
            .get(&normalize_name(hostname))
            .cloned())
    }

    async fn update_record(&self, record: &Record, value: &str) -> Result<bool, Error> {
        let mut records = self.records.write().await;
        match records.get_mut(&normalize_name(&record.name)) {
            Some(held) => {
                held.value = value.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_records_case_insensitively() {
        let provider = InMemoryProvider::with_records([("home.example.com", "10.1.10.1")]);

        let record = provider
            .find_record("HOME.example.com.")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.name, "home.example.com");
        assert_eq!(record.record_type, "A");
        assert_eq!(record.value, "10.1.10.1");

        assert_eq!(provider.find_record("other.example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_empty_hostname() {
        let provider = InMemoryProvider::default();
        assert!(matches!(
            provider.find_record("").await,
            Err(Error::InvalidHostname)
        ));
    }

    #[tokio::test]
    async fn updates_only_held_records() {
        let provider = InMemoryProvider::with_records([("home.example.com", "10.1.10.1")]);
        let record = provider
            .find_record("home.example.com")
            .await
            .unwrap()
            .unwrap();

        assert!(provider.update_record(&record, "192.168.1.1").await.unwrap());
        assert_eq!(
            provider.value_of("home.example.com").await.as_deref(),
            Some("192.168.1.1")
        );

        let stranger = Record {
            name: "gone.example.com".to_string(),
            ..record
        };
        assert!(!provider.update_record(&stranger, "192.168.1.1").await.unwrap());
    }
}
