use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use psyexam_core::models::analysis::{AnalysisRecord, PatientAnalysis};

use crate::error::AnalysisError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the scoring service's REST API.
#[derive(Clone)]
pub struct AnalysisClient {
    base_url: String,
    http: reqwest::Client,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct PatientAnalysesResponse {
    analysis_results: Vec<PatientAnalysis>,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Http(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            timeout_secs,
        })
    }

    /// Ask the service to analyze a stored result. A result that was
    /// analyzed before comes back unchanged.
    pub async fn analyze_result(&self, result_id: i64) -> Result<AnalysisRecord, AnalysisError> {
        let url = format!("{}/api/analyze/{result_id}", self.base_url);
        tracing::info!(result_id, "requesting analysis");
        let response = self.http.post(&url).send().await.map_err(|e| self.send_error(e))?;
        self.read_json(response).await
    }

    /// All analyses stored for a patient.
    pub async fn patient_analyses(
        &self,
        patient_id: i64,
    ) -> Result<Vec<PatientAnalysis>, AnalysisError> {
        let url = format!("{}/api/analysis-results/{patient_id}", self.base_url);
        let response = self.http.get(&url).send().await.map_err(|e| self.send_error(e))?;
        let body: PatientAnalysesResponse = self.read_json(response).await?;
        Ok(body.analysis_results)
    }

    fn send_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_connect() {
            AnalysisError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            AnalysisError::Timeout(self.timeout_secs)
        } else {
            AnalysisError::Http(e.to_string())
        }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AnalysisError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "scoring service error");
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| AnalysisError::ResponseParse(e.to_string()))
    }
}
