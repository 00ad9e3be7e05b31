use dotenvy::dotenv;
use savecast_sdk::{StatusPublisher, StatusRequest, Visibility};

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hello from savecast".to_string());

    let posted = common::mastodon_publisher()
        .publish(&StatusRequest::text(text).with_visibility(Some(Visibility::Direct)))
        .await
        .unwrap();

    println!("{posted:#?}");
}
