use anyhow::{bail, Context, Result};
use common::{Job, JobCreate, JobUpdate};
use std::time::Duration;

/// Async client for the backend's schedule endpoints.
///
/// Failures (transport errors, non-2xx statuses, undecodable bodies) all
/// surface as errors carrying the URL and status; no retries.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        let url = self.url("/schedules/");
        log::debug!("GET {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        check(resp)?
            .json()
            .await
            .context("backend sent an unreadable job list")
    }

    pub async fn get_job(&self, id: i64) -> Result<Job> {
        let url = self.url(&format!("/schedules/{}", id));
        log::debug!("GET {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        check(resp)?
            .json()
            .await
            .context("backend sent an unreadable job")
    }

    pub async fn create_job(&self, req: &JobCreate) -> Result<Job> {
        let url = self.url("/schedules/");
        log::debug!("POST {}", url);
        let resp = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        check(resp)?
            .json()
            .await
            .context("backend sent an unreadable job")
    }

    pub async fn update_job(&self, id: i64, req: &JobUpdate) -> Result<Job> {
        let url = self.url(&format!("/schedules/{}", id));
        log::debug!("PATCH {}", url);
        let resp = self
            .http
            .patch(&url)
            .json(req)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        check(resp)?
            .json()
            .await
            .context("backend sent an unreadable job")
    }

    pub async fn delete_job(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/schedules/{}", id));
        log::debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        // The backend echoes the deleted job; nothing downstream needs it.
        check(resp)?;
        Ok(())
    }
}

fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        bail!("backend returned {} for {}", resp.status(), resp.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn job_body(id: i64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "description": "Nightly backup",
            "schedule_interval": "0 2 * * *",
            "is_completed": false,
            "last_run": null,
            "next_run": "2025-08-06T02:00:00",
            "created_at": "2025-08-01T09:00:00",
            "updated_at": "2025-08-01T09:00:00"
        })
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn lists_jobs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedules/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([job_body(1, "Backup")])))
            .mount(&server)
            .await;

        let jobs = client_for(&server).list_jobs().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Backup");
    }

    #[tokio::test]
    async fn creates_a_job() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/schedules/"))
            .and(body_json(json!({
                "title": "Backup",
                "description": "Nightly backup",
                "schedule_interval": "0 2 * * *"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_body(5, "Backup")))
            .mount(&server)
            .await;

        let req = JobCreate {
            title: "Backup".to_string(),
            description: "Nightly backup".to_string(),
            schedule_interval: "0 2 * * *".to_string(),
        };
        let job = client_for(&server).create_job(&req).await.unwrap();
        assert_eq!(job.id, 5);
    }

    #[tokio::test]
    async fn update_sends_only_the_given_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/schedules/5"))
            .and(body_json(json!({ "title": "Renamed" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_body(5, "Renamed")))
            .mount(&server)
            .await;

        let req = JobUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let job = client_for(&server).update_job(5, &req).await.unwrap();
        assert_eq!(job.title, "Renamed");
    }

    #[tokio::test]
    async fn deletes_a_job() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/schedules/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_body(5, "Backup")))
            .mount(&server)
            .await;

        client_for(&server).delete_job(5).await.unwrap();
    }

    #[tokio::test]
    async fn surfaces_http_errors_with_the_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedules/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).get_job(7).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
