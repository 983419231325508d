//! Network endpoints

use crate::api::{encode_filters, parse_labels};
use crate::client::{EngineClient, Query};
use crate::Result;
use serde_json::{json, Value};

/// Parameters for creating a network
#[derive(Debug, Clone, Default)]
pub struct CreateNetworkOptions {
    pub name: String,
    /// Driver name; the daemon defaults to `bridge`
    pub driver: Option<String>,
    pub internal: bool,
    pub labels: Vec<String>,
}

impl CreateNetworkOptions {
    /// Request body for `POST /networks/create`
    pub fn body(&self) -> Result<Value> {
        let mut body = json!({ "Name": self.name });
        if let Some(ref driver) = self.driver {
            body["Driver"] = json!(driver);
        }
        if self.internal {
            body["Internal"] = json!(true);
        }
        if !self.labels.is_empty() {
            body["Labels"] = Value::Object(parse_labels(&self.labels)?);
        }
        Ok(body)
    }
}

impl EngineClient {
    /// `GET /networks`
    pub async fn list_networks(&self, filters: &[String]) -> Result<Value> {
        let query = Query::new().opt("filters", encode_filters(filters)?);
        self.get("/networks", &query).await
    }

    /// `GET /networks/{id}`
    pub async fn inspect_network(&self, id: &str) -> Result<Value> {
        self.get(&format!("/networks/{}", id), &Query::new()).await
    }

    /// `POST /networks/create`
    pub async fn create_network(&self, options: &CreateNetworkOptions) -> Result<Value> {
        let body = options.body()?;
        self.post("/networks/create", &Query::new(), Some(&body))
            .await
    }

    /// `DELETE /networks/{id}`
    pub async fn remove_network(&self, id: &str) -> Result<()> {
        self.delete(&format!("/networks/{}", id), &Query::new())
            .await?;
        Ok(())
    }
}
