#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, ValidationError};
    use crate::watchlist::{
        NewWatchlistItem, WatchlistItem, WatchlistRepositoryTrait, WatchlistService,
        WatchlistServiceTrait,
    };
    use crate::Result;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockWatchlistRepository {
        items: Mutex<Vec<WatchlistItem>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl WatchlistRepositoryTrait for MockWatchlistRepository {
        fn list(&self) -> Result<Vec<WatchlistItem>> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn add(&self, item: NewWatchlistItem) -> Result<WatchlistItem> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let stored = WatchlistItem {
                id: *next_id,
                symbol: item.symbol,
                tag: item.tag,
                note: item.note,
            };
            self.items.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn remove(&self, id: i32) -> Result<usize> {
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|i| i.id != id);
            Ok(before - items.len())
        }
    }

    fn new_item(symbol: &str) -> NewWatchlistItem {
        NewWatchlistItem {
            symbol: symbol.to_string(),
            tag: " breakout ".to_string(),
            note: String::new(),
        }
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let service = WatchlistService::new(Arc::new(MockWatchlistRepository::default()));

        let first = service.add_item(new_item(" IRCTC ")).await.unwrap();
        service.add_item(new_item("TATAPOWER")).await.unwrap();

        assert_eq!(first.symbol, "IRCTC");
        assert_eq!(first.tag, "breakout");
        assert_eq!(service.get_items().unwrap().len(), 2);

        service.remove_item(first.id).await.unwrap();
        let remaining = service.get_items().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].symbol, "TATAPOWER");
    }

    #[tokio::test]
    async fn test_blank_symbol_rejected() {
        let service = WatchlistService::new(Arc::new(MockWatchlistRepository::default()));

        let result = service.add_item(new_item("   ")).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(service.get_items().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_not_found() {
        let service = WatchlistService::new(Arc::new(MockWatchlistRepository::default()));

        let result = service.remove_item(42).await;

        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }
}
