use dotenvy::dotenv;
use savecast_sdk::SaveSource;

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let saves = common::pocket_source().fetch_recent_saves().await.unwrap();

    for save in saves {
        println!("{} {} <{}>", save.item_id, save.title, save.url);
    }
}
