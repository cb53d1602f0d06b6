//! Headless category listing.

use anyhow::Result;

use crate::api::ApiClient;
use crate::config::Config;
use crate::flows::user_message;
use crate::i18n::Messages;
use crate::session::{FileTokenStore, TokenStore};

pub async fn run(config: &Config) -> Result<()> {
    let messages = Messages::load(&config.language);
    let api = ApiClient::new(config.resolve_base_url()?);
    let store = FileTokenStore::open_default();

    let token = store.read();
    let categories = api
        .categories(token.as_deref())
        .await
        .map_err(|err| anyhow::anyhow!(user_message(&messages, &err, "categoriesFailed")))?;

    if categories.is_empty() {
        println!("{}", messages.get("noCategories"));
        return Ok(());
    }

    for category in categories {
        match category.image_url {
            Some(image_url) => println!("{}  {}  {}", category.id, category.name, image_url),
            None => println!("{}  {}", category.id, category.name),
        }
    }

    Ok(())
}
