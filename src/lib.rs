//! Minimal client for REST APIs authorized with OAuth 1.0a.
//!
//! Requests are signed with HMAC-SHA1 ([`v1`]), sent synchronously and their
//! JSON body decoded. The HTTP client lives behind the `reqwest` feature (on by
//! default); signing works without it.
//!
//! ```no_run
//! use oauthrest::{OAuthClient, Parameters};
//!
//! let client = OAuthClient::new("access token", "access secret", "consumer key", "consumer secret")?;
//! let timeline = client.perform_request(
//!     "statuses/user_timeline",
//!     "GET",
//!     Parameters::new().with("screen_name", "twitterapi").with("count", 2u32),
//! )?;
//! # Ok::<(), oauthrest::Error>(())
//! ```

pub mod error;
pub mod parameters;
pub mod response;
pub mod v1;

#[cfg(feature = "reqwest")]
pub mod builder;
#[cfg(feature = "reqwest")]
pub mod client;

mod util;

pub use error::{Error, Result};
pub use parameters::{prepare_parameters, ParameterValue, Parameters};
pub use response::decode_response;
pub use v1::{Credentials, HttpMethod};

#[cfg(feature = "reqwest")]
pub use builder::{ClientBuilder, ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
#[cfg(feature = "reqwest")]
pub use client::{OAuthClient, PreparedRequest};
