//! Volume endpoints

use crate::api::{encode_filters, parse_labels};
use crate::client::{EngineClient, Query};
use crate::Result;
use serde_json::{json, Value};

/// Parameters for creating a volume
#[derive(Debug, Clone, Default)]
pub struct CreateVolumeOptions {
    pub name: String,
    pub driver: Option<String>,
    pub labels: Vec<String>,
}

impl CreateVolumeOptions {
    /// Request body for `POST /volumes/create`
    pub fn body(&self) -> Result<Value> {
        let mut body = json!({ "Name": self.name });
        if let Some(ref driver) = self.driver {
            body["Driver"] = json!(driver);
        }
        if !self.labels.is_empty() {
            body["Labels"] = Value::Object(parse_labels(&self.labels)?);
        }
        Ok(body)
    }
}

impl EngineClient {
    /// `GET /volumes`
    pub async fn list_volumes(&self, filters: &[String]) -> Result<Value> {
        let query = Query::new().opt("filters", encode_filters(filters)?);
        self.get("/volumes", &query).await
    }

    /// `GET /volumes/{name}`
    pub async fn inspect_volume(&self, name: &str) -> Result<Value> {
        self.get(&format!("/volumes/{}", name), &Query::new()).await
    }

    /// `POST /volumes/create`
    pub async fn create_volume(&self, options: &CreateVolumeOptions) -> Result<Value> {
        let body = options.body()?;
        self.post("/volumes/create", &Query::new(), Some(&body))
            .await
    }

    /// `DELETE /volumes/{name}`
    pub async fn remove_volume(&self, name: &str, force: bool) -> Result<()> {
        let query = Query::new().flag("force", force);
        self.delete(&format!("/volumes/{}", name), &query).await?;
        Ok(())
    }
}
