use serde::{Deserialize, Serialize};

use super::{BackendError, TableBackend};

/// Configuration for the spreadsheet backend connection.
#[derive(Deserialize)]
pub struct SheetsConfig {
    /// Base URL of the spreadsheet values API.
    #[serde(default = "default_base_url")]
    base_url: String,
    /// The spreadsheet holding the `Voters` and `Votes` tables.
    spreadsheet_id: String,
    /// Bearer token for the values API. Provisioning and refreshing the
    /// token is external to this server.
    access_token: String,
}

fn default_base_url() -> String {
    "https://sheets.googleapis.com/v4/spreadsheets".to_string()
}

/// REST client for the spreadsheet values API.
pub struct SheetsClient {
    http: reqwest::Client,
    config: SheetsConfig,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn values_url(&self, table: &str, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{}",
            self.config.base_url, self.config.spreadsheet_id, table, suffix
        )
    }
}

#[rocket::async_trait]
impl TableBackend for SheetsClient {
    async fn read_rows(&self, table: &str) -> Result<Vec<Vec<String>>, BackendError> {
        let response = self
            .http
            .get(self.values_url(table, ""))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }
        let range: ValueRange = response.json().await?;
        Ok(range.values)
    }

    async fn append_row(&self, table: &str, row: Vec<String>) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.values_url(table, ":append?valueInputOption=RAW"))
            .bearer_auth(&self.config.access_token)
            .json(&ValueRange { values: vec![row] })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Wire format of the values API: a block of rows.
#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    // A sheet with no data at all omits the field entirely.
    #[serde(default)]
    values: Vec<Vec<String>>,
}
