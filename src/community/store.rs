use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};

use crate::error::ShowcaseError;

/// Reads a stored handle list. Missing or malformed content is an empty list.
pub fn parse_handles(raw: Option<&str>) -> Vec<String> {
    match raw.map(serde_json::from_str::<Vec<String>>) {
        Some(Ok(handles)) => handles,
        Some(Err(e)) => {
            log::warn!("ignoring stored supporters: {e}");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Where handles submitted on this browser are kept across reloads.
pub trait SupporterStore {
    fn load(&self) -> Vec<String>;

    fn save(&self, handles: &[String]) -> Result<(), ShowcaseError>;

    /// Appends `handle` unless this exact spelling is already stored.
    fn append(&self, handle: &str) -> Result<(), ShowcaseError> {
        let mut handles = self.load();
        if handles.iter().any(|h| h == handle) {
            return Ok(());
        }
        handles.push(handle.to_string());
        self.save(&handles)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalSupporterStore {
    key: String,
}

impl LocalSupporterStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SupporterStore for LocalSupporterStore {
    fn load(&self) -> Vec<String> {
        let raw = LocalStorage::raw().get_item(&self.key).ok().flatten();
        parse_handles(raw.as_deref())
    }

    fn save(&self, handles: &[String]) -> Result<(), ShowcaseError> {
        LocalStorage::set(&self.key, handles)?;
        Ok(())
    }
}

/// GETs the published supporter list.
pub async fn fetch_remote(url: &str) -> Result<Vec<String>, ShowcaseError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(ShowcaseError::FetchStatus(response.status()));
    }
    Ok(response.json::<Vec<String>>().await?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::community::roster::SupporterRoster;
    use gloo_storage::errors::StorageError;
    use std::cell::RefCell;

    /// Local storage stand-in holding the raw stored string.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) raw: RefCell<Option<String>>,
    }

    impl SupporterStore for MemoryStore {
        fn load(&self) -> Vec<String> {
            parse_handles(self.raw.borrow().as_deref())
        }

        fn save(&self, handles: &[String]) -> Result<(), ShowcaseError> {
            let raw = serde_json::to_string(handles).map_err(StorageError::SerdeError)?;
            *self.raw.borrow_mut() = Some(raw);
            Ok(())
        }
    }

    #[test]
    fn missing_or_malformed_storage_is_empty() {
        assert!(parse_handles(None).is_empty());
        assert!(parse_handles(Some("not json")).is_empty());
        assert!(parse_handles(Some(r#"{"a": 1}"#)).is_empty());
        assert_eq!(parse_handles(Some(r#"["ada"]"#)), vec!["ada".to_string()]);
    }

    #[test]
    fn append_writes_once() {
        let store = MemoryStore::default();
        store.append("newuser").unwrap();
        store.append("newuser").unwrap();
        assert_eq!(store.raw.borrow().as_deref(), Some(r#"["newuser"]"#));
    }

    #[test]
    fn append_recovers_from_malformed_storage() {
        let store = MemoryStore::default();
        *store.raw.borrow_mut() = Some("[oops".into());
        store.append("ada").unwrap();
        assert_eq!(store.load(), vec!["ada".to_string()]);
    }

    #[test]
    fn submitted_handle_survives_reload_without_duplicates() {
        let store = MemoryStore::default();
        store.append("newuser").unwrap();

        // Next visit: the published list has since picked the handle up.
        let roster = SupporterRoster::from_sources(
            Ok(vec!["ada".to_string(), "NewUser".to_string()]),
            store.load(),
        );
        assert_eq!(roster.handles(), ["ada".to_string(), "NewUser".to_string()]);
    }

    #[test]
    fn serialization_failures_on_write_are_storage_errors() {
        let Err(err) = serde_json::from_str::<Vec<String>>("[oops") else {
            panic!("malformed json parsed");
        };
        let mapped: ShowcaseError = StorageError::SerdeError(err).into();
        assert!(matches!(mapped, ShowcaseError::Storage(_)));
    }
}
