use async_trait::async_trait;
use meeple_http::{HeaderMap, HttpClient, HttpError, RequestOpts};

/// Where listing markup comes from.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the markup behind `url`.
    async fn fetch(&self, url: &str) -> Result<String, HttpError>;
}

/// Fetches pages with a plain GET.
#[derive(Clone)]
pub struct HttpPageSource {
    client: HttpClient,
    headers: Option<HeaderMap>,
}

impl HttpPageSource {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            headers: None,
        }
    }

    /// Send `agent` as the `User-Agent` header on every request.
    pub fn with_user_agent(mut self, agent: &str) -> Self {
        self.headers = Some(meeple_http::default_headers(agent));
        self
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String, HttpError> {
        let opts = RequestOpts {
            headers: self.headers.clone(),
        };
        self.client.get_text(url, opts).await
    }
}
