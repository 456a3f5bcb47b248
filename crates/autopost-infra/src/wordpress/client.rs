//! WordPress REST API publisher.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use autopost_core::ports::{PostId, PublishRequest, Publisher};

/// WordPress site and application-password credentials.
#[derive(Debug, Clone, Default)]
pub struct WordPressConfig {
    /// Site root, e.g. `https://blog.example.com`.
    pub base_url: String,
    pub username: String,
    pub app_password: String,
    /// Directory local featured images may be read from. Without it only
    /// http(s) images are uploaded.
    pub media_dir: Option<PathBuf>,
}

impl WordPressConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("WP_URL")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            username: std::env::var("WP_USER").unwrap_or_default(),
            app_password: std::env::var("WP_APP_PASSWORD").unwrap_or_default(),
            media_dir: std::env::var("WP_MEDIA_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.username.is_empty() && !self.app_password.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("WordPress credentials are not configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("WordPress answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Reading image failed: {0}")]
    Image(#[from] std::io::Error),

    #[error("Local image {0} is not inside the media directory")]
    LocalImageRejected(String),
}

#[derive(Debug, Deserialize)]
struct Created {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct Tag {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct WpError {
    code: String,
    #[serde(default)]
    data: Option<WpErrorData>,
}

#[derive(Debug, Deserialize)]
struct WpErrorData {
    term_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct NewPost<'a> {
    title: &'a str,
    content: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    featured_media: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_gmt: Option<String>,
}

/// Post status and GMT date for a requested publish time.
fn schedule(publish_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> (&'static str, Option<String>) {
    match publish_at {
        Some(at) if at > now => ("future", Some(at.format("%Y-%m-%dT%H:%M:%S").to_string())),
        Some(at) => ("publish", Some(at.format("%Y-%m-%dT%H:%M:%S").to_string())),
        None => ("publish", None),
    }
}

fn file_name(image: &str) -> String {
    let without_query = image.split(['?', '#']).next().unwrap_or(image);
    without_query
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty() && name.contains('.'))
        .unwrap_or("featured-image.jpg")
        .to_string()
}

fn content_type(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

async fn check(response: Response) -> Result<Response, PublishError> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(PublishError::Status {
        status: response.status().as_u16(),
        body: response.text().await.unwrap_or_default(),
    })
}

/// [`Publisher`] for the WordPress REST API (`/wp-json/wp/v2`).
pub struct WordPressPublisher {
    http: Client,
    config: WordPressConfig,
}

impl WordPressPublisher {
    pub fn new(http: Client, config: WordPressConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.config.base_url, resource)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.config.username, Some(&self.config.app_password))
    }

    async fn create_post(&self, request: &PublishRequest) -> Result<PostId, PublishError> {
        if !self.config.is_configured() {
            return Err(PublishError::NotConfigured);
        }

        let featured_media = match &request.featured_image {
            Some(image) => match self.upload_media(image).await {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(image = %image, error = %e, "Featured image upload failed, posting without it");
                    None
                }
            },
            None => None,
        };

        let mut tags = Vec::with_capacity(request.tags.len());
        for name in &request.tags {
            match self.resolve_tag(name).await {
                Ok(id) => tags.push(id),
                Err(e) => tracing::warn!(tag = %name, error = %e, "Skipping tag"),
            }
        }

        let (status, date_gmt) = schedule(request.publish_at, Utc::now());
        let body = NewPost {
            title: &request.title,
            content: &request.html,
            status,
            tags,
            featured_media,
            date_gmt,
        };

        let response = self
            .authed(self.http.post(self.endpoint("posts")))
            .json(&body)
            .send()
            .await?;
        let created: Created = check(response).await?.json().await?;
        Ok(created.id)
    }

    async fn load_image(&self, image: &str) -> Result<Vec<u8>, PublishError> {
        if image.starts_with("http://") || image.starts_with("https://") {
            let response = check(self.http.get(image).send().await?).await?;
            Ok(response.bytes().await?.to_vec())
        } else {
            self.read_local_image(image).await
        }
    }

    /// Read a local image, confined to the configured media directory.
    async fn read_local_image(&self, image: &str) -> Result<Vec<u8>, PublishError> {
        let Some(dir) = &self.config.media_dir else {
            return Err(PublishError::LocalImageRejected(image.to_string()));
        };
        let root = tokio::fs::canonicalize(dir).await?;
        let path = tokio::fs::canonicalize(root.join(image)).await?;
        if !path.starts_with(&root) {
            return Err(PublishError::LocalImageRejected(image.to_string()));
        }
        Ok(tokio::fs::read(path).await?)
    }

    async fn upload_media(&self, image: &str) -> Result<i64, PublishError> {
        let bytes = self.load_image(image).await?;
        let name = file_name(image);

        let response = self
            .authed(self.http.post(self.endpoint("media")))
            .header(CONTENT_TYPE, content_type(&name))
            .header(CONTENT_DISPOSITION, format!("attachment; filename=\"{name}\""))
            .body(bytes)
            .send()
            .await?;
        let created: Created = check(response).await?.json().await?;

        tracing::debug!(media_id = created.id, file = %name, "Featured image uploaded");
        Ok(created.id)
    }

    /// Id of the tag called `name`, creating it when WordPress has none.
    async fn resolve_tag(&self, name: &str) -> Result<i64, PublishError> {
        let response = self
            .authed(self.http.get(self.endpoint("tags")))
            .query(&[("search", name)])
            .send()
            .await?;
        let existing: Vec<Tag> = check(response).await?.json().await?;
        if let Some(tag) = existing
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
        {
            return Ok(tag.id);
        }

        let response = self
            .authed(self.http.post(self.endpoint("tags")))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await?;
            return match serde_json::from_str::<WpError>(&body) {
                Ok(WpError {
                    code,
                    data: Some(WpErrorData { term_id: Some(id) }),
                }) if code == "term_exists" => Ok(id),
                _ => Err(PublishError::Status { status: 400, body }),
            };
        }
        let created: Created = check(response).await?.json().await?;
        Ok(created.id)
    }
}

#[async_trait]
impl Publisher for WordPressPublisher {
    async fn publish(&self, request: &PublishRequest) -> Option<PostId> {
        match self.create_post(request).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!(title = %request.title, error = %e, "Publishing to WordPress failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const AUTH: &str = "Basic ZWRpdG9yOmFiY2QgZWZnaCBpamts";

    fn publisher(server: &MockServer) -> WordPressPublisher {
        WordPressPublisher::new(
            Client::new(),
            WordPressConfig {
                base_url: server.uri(),
                username: "editor".to_string(),
                app_password: "abcd efgh ijkl".to_string(),
                media_dir: None,
            },
        )
    }

    fn request(featured_image: Option<String>, tags: &[&str]) -> PublishRequest {
        PublishRequest {
            title: "Hello".to_string(),
            html: "<p>Body</p>".to_string(),
            featured_image,
            publish_at: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    async fn mount_post(server: &MockServer, expected: serde_json::Value, id: i64) {
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/posts"))
            .and(header("Authorization", AUTH))
            .and(body_partial_json(expected))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": id})))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_publishes_with_image_and_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/media"))
            .and(header("Content-Disposition", "attachment; filename=\"a.jpg\""))
            .and(header("Content-Type", "image/jpeg"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 77})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/tags"))
            .and(query_param("search", "travel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "name": "Travel"}])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/tags"))
            .and(query_param("search", "food"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/tags"))
            .and(body_partial_json(json!({"name": "food"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9})))
            .expect(1)
            .mount(&server)
            .await;
        mount_post(
            &server,
            json!({"title": "Hello", "status": "publish", "featured_media": 77, "tags": [3, 9]}),
            101,
        )
        .await;

        let image = format!("{}/img/a.jpg", server.uri());
        let id = publisher(&server)
            .publish(&request(Some(image), &["travel", "food"]))
            .await;
        assert_eq!(id, Some(101));
    }

    #[tokio::test]
    async fn test_future_date_schedules_post() {
        let server = MockServer::start().await;
        mount_post(
            &server,
            json!({"status": "future", "date_gmt": "2099-01-02T03:04:00"}),
            5,
        )
        .await;

        let mut req = request(None, &[]);
        req.publish_at = Some(Utc.with_ymd_and_hms(2099, 1, 2, 3, 4, 0).unwrap());
        assert_eq!(publisher(&server).publish(&req).await, Some(5));
    }

    #[tokio::test]
    async fn test_failed_image_upload_still_posts() {
        let server = MockServer::start().await;
        mount_post(&server, json!({"title": "Hello", "status": "publish"}), 8).await;

        let missing = "/definitely/not/here.png".to_string();
        assert_eq!(
            publisher(&server).publish(&request(Some(missing), &[])).await,
            Some(8)
        );
        let requests = server.received_requests().await.unwrap_or_default();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("featured_media").is_none());
    }

    #[tokio::test]
    async fn test_local_images_are_confined_to_media_dir() {
        let server = MockServer::start().await;
        let media = tempfile::TempDir::new().unwrap();
        std::fs::write(media.path().join("local.png"), [0x89, 0x50]).unwrap();
        let outside = tempfile::NamedTempFile::new().unwrap();

        let mut publisher = publisher(&server);
        assert!(matches!(
            publisher.load_image(&outside.path().display().to_string()).await,
            Err(PublishError::LocalImageRejected(_))
        ));

        publisher.config.media_dir = Some(media.path().to_path_buf());
        assert!(matches!(
            publisher.load_image(&outside.path().display().to_string()).await,
            Err(PublishError::LocalImageRejected(_))
        ));
        assert!(publisher.load_image("../../etc/passwd").await.is_err());
        assert_eq!(publisher.load_image("local.png").await.unwrap(), vec![0x89, 0x50]);
        let absolute = media.path().join("local.png").display().to_string();
        assert_eq!(publisher.load_image(&absolute).await.unwrap(), vec![0x89, 0x50]);
    }

    #[tokio::test]
    async fn test_existing_term_error_resolves_tag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/tags"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "term_exists",
                "message": "A term with the name provided already exists.",
                "data": {"status": 400, "term_id": 42}
            })))
            .mount(&server)
            .await;
        mount_post(&server, json!({"tags": [42]}), 1).await;

        assert_eq!(publisher(&server).publish(&request(None, &["news"])).await, Some(1));
    }

    #[tokio::test]
    async fn test_server_error_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/posts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        assert_eq!(publisher(&server).publish(&request(None, &[])).await, None);
    }

    #[tokio::test]
    async fn test_unconfigured_publisher_returns_none() {
        let publisher = WordPressPublisher::new(Client::new(), WordPressConfig::default());
        assert_eq!(publisher.publish(&request(None, &[])).await, None);
    }

    #[test]
    fn test_file_name_and_content_type() {
        assert_eq!(file_name("http://x/photos/sea.PNG?w=800"), "sea.PNG");
        assert_eq!(content_type("sea.PNG"), "image/png");
        assert_eq!(file_name("http://x/download"), "featured-image.jpg");
        assert_eq!(content_type("featured-image.jpg"), "image/jpeg");
    }

    #[test]
    fn test_schedule() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(schedule(None, now), ("publish", None));
        let past = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(
            schedule(Some(past), now),
            ("publish", Some("2025-06-01T12:00:00".to_string()))
        );
    }
}
