use oauthrest::{Error, OAuthClient, Parameters};
use std::env;

fn var(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("set {} to run this example", name))
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let client = OAuthClient::new(
        var("OAUTH_ACCESS_TOKEN"),
        var("OAUTH_ACCESS_TOKEN_SECRET"),
        var("OAUTH_CONSUMER_KEY"),
        var("OAUTH_CONSUMER_SECRET"),
    )?;
    let screen_name = env::args().nth(1).unwrap_or_else(|| "twitterapi".to_owned());

    let params = Parameters::new()
        .with("screen_name", screen_name)
        .with("count", 5u32);
    match client.perform_request("statuses/user_timeline", "GET", params)? {
        Some(timeline) => println!("{:#}", timeline),
        None => println!("(no content)"),
    }
    Ok(())
}
