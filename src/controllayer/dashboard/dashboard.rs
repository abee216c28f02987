use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::datalayer::store::DocumentStore;
use crate::errors::ServiceResult;

/// Document counts across the lending collections
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub collections: BTreeMap<String, u64>,
    pub total: u64,
    pub generated_at: DateTime<Utc>,
}

pub async fn summarize(
    store: &dyn DocumentStore,
    collections: &[&str],
) -> ServiceResult<DashboardSummary> {
    let mut counts = BTreeMap::new();
    for collection in collections {
        let count = store.count(collection).await?;
        counts.insert(collection.to_string(), count);
    }

    Ok(DashboardSummary {
        total: counts.values().sum(),
        collections: counts,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datalayer::store::MockDocumentStore;
    use crate::errors::ServiceError;

    #[tokio::test]
    async fn test_summarize_counts_each_collection() {
        let mut store = MockDocumentStore::new();
        store.expect_count().returning(|collection| {
            Ok(match collection {
                "students" => 4,
                "books" => 10,
                _ => 1,
            })
        });

        let summary = summarize(&store, &["students", "books", "loans"])
            .await
            .unwrap();

        assert_eq!(summary.collections["students"], 4);
        assert_eq!(summary.collections["books"], 10);
        assert_eq!(summary.collections["loans"], 1);
        assert_eq!(summary.total, 15);
    }

    #[tokio::test]
    async fn test_summarize_propagates_store_errors() {
        let mut store = MockDocumentStore::new();
        store
            .expect_count()
            .returning(|_| Err(ServiceError::DatabaseConnectionError));

        let err = summarize(&store, &["loans"]).await.unwrap_err();
        assert!(matches!(err, ServiceError::DatabaseConnectionError));
    }
}
