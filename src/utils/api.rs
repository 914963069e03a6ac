use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;

use crate::config;

/// Request builder for the landing page backend.
pub struct Api;

pub struct RequestWrapper {
    request: Request,
    path: String,
}

impl RequestWrapper {
    fn get(path: &str) -> Self {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        Self {
            request: Request::get(&full_url).header("Accept", "application/json"),
            path: path.to_string(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    pub async fn send(self) -> Result<Response, GlooError> {
        log::debug!("GET {}", self.path);
        self.request.send().await
    }
}

impl Api {
    pub fn get(path: &str) -> RequestWrapper {
        RequestWrapper::get(path)
    }
}
