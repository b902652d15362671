use crate::builder::{ClientBuilder, ClientConfig};
use crate::error::{Error, Result};
use crate::parameters::{prepare_parameters, Parameters};
use crate::response::decode_response;
use crate::util;
use crate::v1::{Credentials, HttpMethod, Signer};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, instrument, warn};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const ENDPOINT_SUFFIX: &str = ".json";

/// A signed request, ready to be sent.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: url::Url,
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Urlencoded form body, only for POST with parameters.
    pub body: Option<String>,
}

/// Synchronous client signing every request with OAuth 1.0a.
///
/// The client owns its HTTP connection pool; it is reused across calls and
/// released when the client is dropped.
pub struct OAuthClient {
    credentials: Credentials,
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl OAuthClient {
    /// Creates a client for the default API URL.
    pub fn new(
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Result<Self> {
        ClientBuilder::new(Credentials::new(
            access_token,
            access_token_secret,
            consumer_key,
            consumer_secret,
        ))
        .build()
    }

    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    pub(crate) fn from_parts(
        credentials: Credentials,
        config: ClientConfig,
        http: reqwest::blocking::Client,
    ) -> Self {
        OAuthClient {
            credentials,
            config,
            http,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_url(&self) -> &url::Url {
        &self.config.api_url
    }

    /// Turns TLS peer certificate verification on or off.
    ///
    /// The HTTP client is rebuilt, pooled connections are dropped.
    pub fn set_verify_peer(&mut self, verify_peer: bool) -> Result<()> {
        let mut config = self.config.clone();
        config.verify_peer = verify_peer;
        self.http = config.http_client()?;
        self.config = config;
        Ok(())
    }

    /// Calls `{api_url}{endpoint}.json` with `method`, which must be `GET` or `POST`.
    ///
    /// Returns `Ok(None)` when the response has no content.
    pub fn perform_request(
        &self,
        endpoint: &str,
        method: &str,
        parameters: Parameters,
    ) -> Result<Option<Value>> {
        let method = method.parse::<HttpMethod>()?;
        self.execute(endpoint, method, parameters)
    }

    pub fn get(&self, endpoint: &str, parameters: Parameters) -> Result<Option<Value>> {
        self.execute(endpoint, HttpMethod::Get, parameters)
    }

    pub fn post(&self, endpoint: &str, parameters: Parameters) -> Result<Option<Value>> {
        self.execute(endpoint, HttpMethod::Post, parameters)
    }

    /// Builds and signs a request without sending it.
    ///
    /// GET parameters go to the query string, POST parameters to the form body.
    /// The endpoint is a plain path and must not carry a query or fragment.
    pub fn build_request(
        &self,
        endpoint: &str,
        method: HttpMethod,
        parameters: Parameters,
    ) -> Result<PreparedRequest> {
        if endpoint.contains(|c: char| c == '?' || c == '#') {
            return Err(Error::InvalidArgument(format!(
                "Endpoint must not contain a query or fragment: {:?}",
                endpoint
            )));
        }
        let parameters = prepare_parameters(parameters, self.config.escape_leading_mention);

        let mut request_url = format!("{}{}{}", self.config.api_url, endpoint, ENDPOINT_SUFFIX);
        let mut body = None;
        if !parameters.is_empty() {
            match method {
                HttpMethod::Get => {
                    request_url.push_str(&util::http_query_string(parameters.iter()))
                }
                HttpMethod::Post => body = Some(util::encode_pairs(parameters.iter())),
            }
        }
        let url = url::Url::parse(&request_url).map_err(|e| {
            Error::InvalidArgument(format!("Invalid request URL {:?}: {}", request_url, e))
        })?;

        let form_params = match method {
            HttpMethod::Get => Vec::new(),
            HttpMethod::Post => parameters.iter().collect::<Vec<(&str, &str)>>(),
        };
        let signed = Signer::new(&self.credentials).sign(method, &url, form_params);

        Ok(PreparedRequest {
            method,
            url,
            authorization: signed.authorization_header(),
            body,
        })
    }

    #[instrument(skip(self, parameters))]
    fn execute(
        &self,
        endpoint: &str,
        method: HttpMethod,
        parameters: Parameters,
    ) -> Result<Option<Value>> {
        let PreparedRequest {
            method,
            url,
            authorization,
            body,
        } = self.build_request(endpoint, method, parameters)?;
        debug!(method = %method, url = %url, "sending request");

        let request = match method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
        };
        let mut request = request
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send()?;
        let status = response.status();
        debug!(status = %status, "received response");
        if !status.is_success() {
            warn!(status = %status, "request returned a non-success status");
        }
        let body = response.text()?;
        decode_response(&body)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn client() -> OAuthClient {
        OAuthClient::builder(Credentials::new("token", "token-secret", "ck", "cs"))
            .api_url("https://api.example.com/1.1/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_unsupported_method_is_rejected() {
        // nothing listens on the discard port, a network attempt would surface as Transport
        let client = OAuthClient::builder(Credentials::new("t", "ts", "ck", "cs"))
            .api_url("http://127.0.0.1:9/")
            .build()
            .unwrap();
        for method in ["PUT", "DELETE", "get"] {
            match client.perform_request("statuses/update", method, Parameters::new()) {
                Err(Error::InvalidArgument(_)) => {}
                other => panic!("unexpected result for {}: {:?}", method, other),
            }
        }
    }

    #[test]
    fn test_get_request_url() {
        let params = Parameters::new()
            .with("screen_name", "twitter api")
            .with("count", 2u32);
        let request = client()
            .build_request("statuses/user_timeline", HttpMethod::Get, params)
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/1.1/statuses/user_timeline.json?screen_name=twitter%20api&count=2"
        );
        assert!(request.body.is_none());
        assert!(request
            .authorization
            .starts_with("OAuth oauth_consumer_key=\"ck\", oauth_nonce=\""));
        assert!(request.authorization.contains("oauth_token=\"token\""));
        assert!(request.authorization.contains("oauth_signature=\""));
    }

    #[test]
    fn test_get_without_parameters_has_no_query() {
        let request = client()
            .build_request("account/verify_credentials", HttpMethod::Get, Parameters::new())
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/1.1/account/verify_credentials.json"
        );
        assert!(request.url.query().is_none());
    }

    #[test]
    fn test_post_request_body() {
        let params = Parameters::new().with("status", "@alice Hello Ladies + Gentlemen");
        let request = client()
            .build_request("statuses/update", HttpMethod::Post, params)
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/1.1/statuses/update.json"
        );
        let body = request.body.unwrap();
        assert_eq!(body, "status=%00%40alice%20Hello%20Ladies%20%2B%20Gentlemen");
        let value = body.trim_start_matches("status=");
        assert_eq!(
            percent_decode_str(value).decode_utf8().unwrap(),
            "\0@alice Hello Ladies + Gentlemen"
        );
    }

    #[test]
    fn test_post_without_mention_escaping() {
        let client = OAuthClient::builder(Credentials::new("token", "token-secret", "ck", "cs"))
            .escape_leading_mention(false)
            .build()
            .unwrap();
        let params = Parameters::new().with("status", "@alice hi");
        let request = client
            .build_request("statuses/update", HttpMethod::Post, params)
            .unwrap();
        assert_eq!(request.body.as_deref(), Some("status=%40alice%20hi"));
        assert_eq!(
            request.url.as_str(),
            "https://api.twitter.com/1.1/statuses/update.json"
        );
    }

    #[test]
    fn test_endpoint_with_query_or_fragment_is_rejected() {
        let client = client();
        for endpoint in ["statuses/show#x", "statuses/show?id=1", "statuses/show.json?"] {
            let params = Parameters::new().with("id", 1u64);
            match client.build_request(endpoint, HttpMethod::Get, params) {
                Err(Error::InvalidArgument(msg)) => assert!(msg.contains(endpoint)),
                other => panic!("unexpected result for {}: {:?}", endpoint, other),
            }
        }
        match client.get("statuses/show#x", Parameters::new()) {
            Err(Error::InvalidArgument(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_set_verify_peer() {
        let mut client = client();
        assert!(client.config().verify_peer);
        client.set_verify_peer(false).unwrap();
        assert!(!client.config().verify_peer);
        client.set_verify_peer(true).unwrap();
        assert!(client.config().verify_peer);
    }
}
