use crate::util;
use crate::v1::values::*;
use crate::v1::Credentials;
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::borrow::Cow;
use tracing::trace;
use uuid::Uuid;

type HmacSha1 = Hmac<Sha1>;

/// Contents signed with OAuth1a.
#[derive(Clone, Debug)]
pub struct SignedContent {
    pub base_string: String,
    pub signature: String,
    /// `oauth_*` parameters in header order, `oauth_signature` last.
    pub oauth_params: Vec<(&'static str, String)>,
}

impl SignedContent {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.oauth_params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for the `Authorization` header, `OAuth key="value", ...`.
    pub fn authorization_header(&self) -> String {
        let values = self
            .oauth_params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}=\"{}\"",
                    util::percent_encode(k),
                    util::percent_encode(v)
                )
            })
            .collect::<Vec<String>>()
            .join(", ");
        format!("{} {}", OAUTH_HEADER, values)
    }
}

/// Signs one request with HMAC-SHA1.
///
/// Nonce and timestamp are generated per call unless pinned.
pub struct Signer<'a> {
    credentials: &'a Credentials,
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<i64>,
}

impl<'a> Signer<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Signer {
            credentials,
            nonce: None,
            timestamp: None,
        }
    }

    pub fn nonce<T: Into<Cow<'a, str>>>(mut self, nonce: T) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Signs a request to `url`, whose query takes part in the signature.
    /// `form_params` are the parameters sent in an urlencoded body, empty for GET.
    pub fn sign<'p, I>(self, http_method: HttpMethod, url: &url::Url, form_params: I) -> SignedContent
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let timestamp = self.timestamp.unwrap_or_else(|| Utc::now().timestamp());
        // generate nonce when it is not specified
        let nonce = self
            .nonce
            .unwrap_or_else(|| Cow::from(Uuid::new_v4().simple().to_string()));

        let mut oauth_params = build_basic_params(self.credentials, nonce.into_owned(), timestamp);
        let base_string = signature_base_string(http_method, url, form_params, &oauth_params);
        trace!(base_string = %base_string, "computed signature base string");

        let sign_key = signing_key(
            self.credentials.consumer_secret(),
            self.credentials.access_token_secret(),
        );
        let signature = sign_hmac_sha1(&sign_key, &base_string);
        oauth_params.push((OAUTH_PARAM_KEY_SIGNATURE, signature.clone()));

        SignedContent {
            base_string,
            signature,
            oauth_params,
        }
    }
}

fn build_basic_params(
    credentials: &Credentials,
    nonce: String,
    timestamp: i64,
) -> Vec<(&'static str, String)> {
    vec![
        (
            OAUTH_PARAM_KEY_CONSUMER_KEY,
            credentials.consumer_key().to_owned(),
        ),
        (OAUTH_PARAM_KEY_NONCE, nonce),
        (
            OAUTH_PARAM_KEY_SIGNATURE_METHOD,
            OAUTH_VALUE_SIGMETHOD_HMACSHA1.to_owned(),
        ),
        (OAUTH_PARAM_KEY_TIMESTAMP, timestamp.to_string()),
        (OAUTH_PARAM_KEY_TOKEN, credentials.access_token().to_owned()),
        (OAUTH_PARAM_KEY_VERSION, OAUTH_VALUE_VERSION.to_owned()),
    ]
}

/// Builds `METHOD&enc(base uri)&enc(sorted params)`.
///
/// The URL query, the form parameters and the oauth parameters are merged in
/// that order (later keys win) and sorted by key before encoding.
pub fn signature_base_string<'p, I>(
    http_method: HttpMethod,
    url: &url::Url,
    form_params: I,
    oauth_params: &[(&str, String)],
) -> String
where
    I: IntoIterator<Item = (&'p str, &'p str)>,
{
    let (endpoint, mut params) = util::url_to_endpoint_and_queries(url);
    params.extend(
        form_params
            .into_iter()
            .map(|(k, v)| (Cow::Borrowed(k), Cow::Borrowed(v))),
    );
    params.extend(
        oauth_params
            .iter()
            .map(|(k, v)| (Cow::Borrowed(*k), Cow::Borrowed(v.as_str()))),
    );

    // BTreeMap iterates in byte order of the keys
    let encoded_params = util::encode_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    // (parameters are encoded twice.)
    format!(
        "{}&{}&{}",
        http_method.as_str(),
        util::percent_encode(endpoint),
        util::percent_encode(&encoded_params)
    )
}

/// `enc(consumer_secret)&enc(token_secret)`, the `&` stays even for an empty token secret.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        util::percent_encode(consumer_secret),
        util::percent_encode(token_secret)
    )
}

pub fn sign_hmac_sha1(sign_key: &str, base_string: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(sign_key.as_bytes())
        .expect("HMAC-SHA1 accepts keys of any length");
    mac.update(base_string.as_bytes());
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
