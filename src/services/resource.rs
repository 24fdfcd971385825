use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use super::ServiceError;
use crate::repositories::wallet::WalletApi;

/// Phase snapshot for one resource. At most one request cycle runs at a
/// time; a rejection keeps the last fulfilled data visible.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> ResourceState<T> {
    pub fn new() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fulfill(&mut self, data: T) {
        self.loading = false;
        self.data = Some(data);
    }

    fn reject(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One state container per resource kind, bound to a fixed endpoint path.
#[derive(Clone)]
pub struct ResourceStore<T> {
    resource: &'static str,
    path: String,
    api: WalletApi,
    state: Arc<RwLock<ResourceState<T>>>,
}

impl<T> ResourceStore<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync,
{
    fn new(resource: &'static str, path: String, api: WalletApi) -> Self {
        Self {
            resource,
            path,
            api,
            state: Arc::new(RwLock::new(ResourceState::new())),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn snapshot(&self) -> ResourceState<T> {
        self.state.read().await.clone()
    }

    /// GET the bound path. A dispatch while a request is in flight is
    /// rejected with `Busy` and leaves the state to the running cycle.
    pub async fn dispatch_fetch(&self) -> Result<T, ServiceError> {
        self.begin().await?;

        match self.api.fetch::<T>(&self.path).await {
            Ok(data) => {
                self.state.write().await.fulfill(data.clone());
                log::info!("Fetched {} from {}.", self.resource, self.path);
                Ok(data)
            }
            Err(e) => Err(self.reject(e.to_string()).await),
        }
    }

    /// PUT a full payload to the bound path and store the server's echo.
    pub async fn dispatch_save(&self, payload: T) -> Result<T, ServiceError> {
        self.begin().await?;

        match self.api.save::<T, T>(&self.path, &payload).await {
            Ok(echo) => {
                self.state.write().await.fulfill(echo.clone());
                log::info!("Saved {} to {}.", self.resource, self.path);
                Ok(echo)
            }
            Err(e) => Err(self.reject(e.to_string()).await),
        }
    }

    async fn begin(&self) -> Result<(), ServiceError> {
        let mut state = self.state.write().await;
        if state.loading {
            log::warn!(
                "Rejected {} dispatch while a request is in flight.",
                self.resource
            );
            return Err(ServiceError::Busy(self.resource));
        }
        state.begin();
        Ok(())
    }

    async fn reject(&self, message: String) -> ServiceError {
        self.state.write().await.reject(message.clone());
        log::error!("{} request failed: {}", self.resource, message);
        ServiceError::Request(self.resource, message)
    }
}

/// Mints the per-resource containers; every container shares one API
/// client and credential provider.
#[derive(Clone)]
pub struct ResourceFactory {
    api: WalletApi,
}

impl ResourceFactory {
    pub fn new(api: WalletApi) -> Self {
        Self { api }
    }

    pub fn container<T>(&self, resource: &'static str, path: String) -> ResourceStore<T>
    where
        T: Clone + Serialize + DeserializeOwned + Send + Sync,
    {
        ResourceStore::new(resource, path, self.api.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_is_empty() {
        let state: ResourceState<u32> = ResourceState::new();
        assert_eq!(state.data, None);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn a_new_cycle_clears_the_previous_error() {
        let mut state: ResourceState<u32> = ResourceState::new();
        state.begin();
        state.reject("boom".to_string());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("boom"));

        state.begin();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn rejection_keeps_stale_data() {
        let mut state = ResourceState::new();
        state.begin();
        state.fulfill(7u32);
        state.begin();
        state.reject("late failure".to_string());

        assert_eq!(state.data, Some(7));
        assert_eq!(state.error.as_deref(), Some("late failure"));
        assert!(!state.loading);
    }

    #[test]
    fn fulfillment_overwrites_wholesale() {
        let mut state = ResourceState::new();
        state.begin();
        state.fulfill(1u32);
        state.begin();
        state.fulfill(2u32);

        assert_eq!(state.data, Some(2));
        assert!(state.error.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn fulfillment_after_an_error_cycle_leaves_no_error() {
        let mut state = ResourceState::new();
        state.begin();
        state.reject("first try failed".to_string());
        state.begin();
        state.fulfill(3u32);

        assert_eq!(state.data, Some(3));
        assert!(state.error.is_none());
        assert!(!state.loading);
    }
}
