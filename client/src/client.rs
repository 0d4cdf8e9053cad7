//! HTTP implementation of [`MenuApi`]

use crate::{
    api::MenuApi,
    config::ClientConfig,
    error::ClientError,
    types::{IceCream, MenuItem, NewMenuItem, sort_by_name, sort_menu},
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

const MENU_PATH: &str = "/api/menu";
const STOCK_PATH: &str = "/api/menu/stock-ice-creams";

/// Menu client backed by `reqwest`
#[derive(Clone, Debug)]
pub struct HttpMenuClient {
    client: Client,
    config: ClientConfig,
}

impl HttpMenuClient {
    /// Create a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and hand back the successful response body
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Vec<u8>, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                path: path.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ClientError> {
        let body = self.send(request, path).await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MenuApi for HttpMenuClient {
    #[tracing::instrument(skip(self))]
    async fn list_menu(&self) -> Result<Vec<MenuItem>, ClientError> {
        let request = self.client.get(self.config.endpoint(MENU_PATH));
        let mut items: Vec<MenuItem> = self.send_json(request, MENU_PATH).await?;
        sort_menu(&mut items);
        tracing::debug!(count = items.len(), "Fetched menu");
        Ok(items)
    }

    #[tracing::instrument(skip(self))]
    async fn get_menu_item(&self, id: u64) -> Result<MenuItem, ClientError> {
        let path = format!("{MENU_PATH}/{id}");
        let request = self.client.get(self.config.endpoint(&path));
        self.send_json(request, &path).await
    }

    #[tracing::instrument(skip(self, item), fields(ice_cream = %item.ice_cream.name))]
    async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, ClientError> {
        let request = self.client.post(self.config.endpoint(MENU_PATH)).json(&item);
        let created: MenuItem = self.send_json(request, MENU_PATH).await?;
        tracing::info!(id = created.id, "Created menu item");
        Ok(created)
    }

    #[tracing::instrument(skip(self, item), fields(id = item.id))]
    async fn update_menu_item(&self, item: MenuItem) -> Result<MenuItem, ClientError> {
        let path = format!("{MENU_PATH}/{}", item.id);
        let request = self.client.put(self.config.endpoint(&path)).json(&item);
        let updated = self.send_json(request, &path).await?;
        tracing::info!("Updated menu item");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_menu_item(&self, id: u64) -> Result<(), ClientError> {
        let path = format!("{MENU_PATH}/{id}");
        let request = self.client.delete(self.config.endpoint(&path));
        self.send(request, &path).await?;
        tracing::info!("Deleted menu item");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_stock(&self) -> Result<Vec<IceCream>, ClientError> {
        let request = self.client.get(self.config.endpoint(STOCK_PATH));
        let mut ice_creams: Vec<IceCream> = self.send_json(request, STOCK_PATH).await?;
        sort_by_name(&mut ice_creams);
        tracing::debug!(count = ice_creams.len(), "Fetched stock ice creams");
        Ok(ice_creams)
    }

    #[tracing::instrument(skip(self))]
    async fn get_stock(&self, id: u64) -> Result<IceCream, ClientError> {
        let path = format!("{STOCK_PATH}/{id}");
        let request = self.client.get(self.config.endpoint(&path));
        self.send_json(request, &path).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = ClientConfig::new("http://localhost:3001").unwrap();
        let client = HttpMenuClient::new(config).unwrap();

        assert_eq!(client.config().endpoint(MENU_PATH), "http://localhost:3001/api/menu");
        assert_eq!(
            client.config().endpoint(&format!("{STOCK_PATH}/2")),
            "http://localhost:3001/api/menu/stock-ice-creams/2"
        );
    }
}
