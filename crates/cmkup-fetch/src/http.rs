use std::io::Read;

/// A response body being streamed from the server.
pub struct Body {
    pub reader: Box<dyn Read + Send>,
    /// From `Content-Length`, when present.
    pub content_length: Option<u64>,
}

/// Blocking HTTP client abstraction.
///
/// Implementations follow redirects, apply their own timeouts and map
/// non-success status codes to errors.
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET request and return the body as a reader.
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Body, Self::Error>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    type Error = C::Error;

    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<Body, Self::Error> {
        (**self).get(url, headers)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::{Body, HttpClient};
    use crate::error::{FetchError, Result};

    /// Production client backed by `reqwest::blocking`.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::blocking::Client,
    }

    impl ReqwestClient {
        pub fn new() -> Result<Self> {
            Self::with_timeout(None)
        }

        /// `timeout` bounds the whole request, body included.
        pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
            let mut builder = reqwest::blocking::Client::builder()
                .user_agent(concat!("cmkup/", env!("CARGO_PKG_VERSION")));
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder.build().map_err(|e| FetchError::Client(Box::new(e)))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> std::result::Result<Body, Self::Error> {
            let mut request = self.client.get(url);
            for (key, value) in headers {
                request = request.header(key, value);
            }
            let response = request.send()?.error_for_status()?;
            let content_length = response.content_length();
            Ok(Body {
                reader: Box::new(response),
                content_length,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
