use crate::models::{
    Course, CreateLeadRequest, CreateUserRequest, FollowUp, Lead, UpdateLeadRequest,
    UpdateUserRequest, User,
};
use crate::seeds::sample_data;
use crate::utils::AppError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// CRM REST backend. The backend is authoritative for every entity.
#[async_trait]
pub trait CrmBackend: Send + Sync {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, AppError>;
    async fn create_lead(&self, lead: &CreateLeadRequest) -> Result<Lead, AppError>;
    async fn update_lead(&self, id: &str, updates: &UpdateLeadRequest) -> Result<Lead, AppError>;
    async fn delete_lead(&self, id: &str) -> Result<(), AppError>;
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn fetch_users(&self) -> Result<Vec<User>, AppError>;
    async fn create_user(&self, user: &CreateUserRequest) -> Result<User, AppError>;
    async fn update_user(&self, id: &str, updates: &UpdateUserRequest) -> Result<User, AppError>;
    async fn fetch_follow_ups(&self) -> Result<Vec<FollowUp>, AppError>;
}

/// `CrmBackend` over HTTP/JSON (`reqwest`)
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, urlencoding::encode(id))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.url(path);
        log::debug!("🌐 GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::LoadFailed(format!("GET {}: {}", path, e)))?;

        if !response.status().is_success() {
            return Err(AppError::LoadFailed(format!("GET {}: backend returned {}", path, response.status())));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LoadFailed(format!("GET {}: invalid body: {}", path, e)))
    }

    async fn send_json<B, T>(&self, method: reqwest::Method, url: String, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        log::debug!("🌐 {} {}", method, url);

        let response = self
            .client
            .request(method.clone(), &url)
            .header("Accept", "application/json")
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::SaveFailed(format!("{} {}: {}", method, url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::SaveFailed(format!(
                "{} {}: backend returned {}",
                method,
                url,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::SaveFailed(format!("{} {}: invalid body: {}", method, url, e)))
    }
}

#[async_trait]
impl CrmBackend for HttpBackend {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, AppError> {
        self.get_json("/leads").await
    }

    async fn create_lead(&self, lead: &CreateLeadRequest) -> Result<Lead, AppError> {
        self.send_json(reqwest::Method::POST, self.url("/leads"), lead).await
    }

    async fn update_lead(&self, id: &str, updates: &UpdateLeadRequest) -> Result<Lead, AppError> {
        self.send_json(reqwest::Method::PUT, self.item_url("leads", id), updates).await
    }

    async fn delete_lead(&self, id: &str) -> Result<(), AppError> {
        let url = self.item_url("leads", id);
        log::debug!("🌐 DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::DeleteFailed(format!("DELETE {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::DeleteFailed(format!(
                "DELETE {}: backend returned {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        self.get_json("/courses").await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, AppError> {
        self.get_json("/users").await
    }

    async fn create_user(&self, user: &CreateUserRequest) -> Result<User, AppError> {
        self.send_json(reqwest::Method::POST, self.url("/users"), user).await
    }

    async fn update_user(&self, id: &str, updates: &UpdateUserRequest) -> Result<User, AppError> {
        self.send_json(reqwest::Method::PUT, self.item_url("users", id), updates).await
    }

    async fn fetch_follow_ups(&self) -> Result<Vec<FollowUp>, AppError> {
        self.get_json("/followups").await
    }
}

/// Where the cached data came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Backend,
    #[default]
    Sample,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub leads: Vec<Lead>,
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub follow_ups: Vec<FollowUp>,
    pub source: DataSource,
    /// Set when the backend failed and sample data was substituted
    pub warning: Option<String>,
}

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data from backend.";

/// Loads all four collections concurrently. Any failure swaps in the
/// bundled sample data; there is no retry.
pub async fn load_snapshot(backend: &dyn CrmBackend) -> Snapshot {
    let result = tokio::try_join!(
        backend.fetch_leads(),
        backend.fetch_courses(),
        backend.fetch_users(),
        backend.fetch_follow_ups(),
    );

    match result {
        Ok((leads, courses, users, follow_ups)) => {
            log::info!(
                "✅ Loaded from backend: {} leads, {} users, {} courses, {} follow-ups",
                leads.len(),
                users.len(),
                courses.len(),
                follow_ups.len()
            );
            Snapshot { leads, users, courses, follow_ups, source: DataSource::Backend, warning: None }
        }
        Err(e) => {
            log::warn!("⚠️  {} ({}) Using sample data.", LOAD_FAILED_MESSAGE, e);
            Snapshot {
                leads: sample_data::sample_leads(),
                users: sample_data::sample_users(),
                courses: sample_data::sample_courses(),
                follow_ups: sample_data::sample_follow_ups(),
                source: DataSource::Sample,
                warning: Some(LOAD_FAILED_MESSAGE.to_string()),
            }
        }
    }
}
