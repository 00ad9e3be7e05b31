use savecast_sdk::{
    mastodon::{MastodonPublisher, MastodonPublisherOptions},
    pocket::{PocketSource, PocketSourceOptions},
};

fn env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("{key} environment variable must be set"))
}

#[allow(dead_code)]
pub fn pocket_source() -> PocketSource {
    PocketSource::new(PocketSourceOptions {
        consumer_key: env("POCKET_CONSUMER_KEY"),
        access_token: env("POCKET_ACCESS_TOKEN"),
        ..Default::default()
    })
}

#[allow(dead_code)]
pub fn mastodon_publisher() -> MastodonPublisher {
    MastodonPublisher::new(MastodonPublisherOptions {
        server: env("MASTODON_SERVER"),
        access_token: env("MASTODON_TOKEN"),
        client: None,
    })
}
