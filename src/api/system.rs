//! System endpoints

use crate::client::{EngineClient, Query};
use crate::Result;
use serde_json::Value;

impl EngineClient {
    /// `GET /info`
    pub async fn system_info(&self) -> Result<Value> {
        self.get("/info", &Query::new()).await
    }

    /// `GET /version`
    pub async fn version(&self) -> Result<Value> {
        self.get("/version", &Query::new()).await
    }

    /// `GET /_ping`, returning the daemon's reply (normally `OK`)
    pub async fn ping(&self) -> Result<String> {
        let reply = self.get("/_ping", &Query::new()).await?;
        Ok(match reply {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    /// Checks if the daemon is reachable.
    pub async fn is_running(&self) -> bool {
        self.ping().await.is_ok()
    }
}
