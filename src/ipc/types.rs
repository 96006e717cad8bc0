use crate::classbook::Classbook;
use crate::config::Config;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub book: Classbook,
}

impl AppState {
    pub fn new(book: Classbook) -> Self {
        AppState { book }
    }

    pub fn from_config(config: &Config) -> Self {
        AppState::new(Classbook::new(config.roster(), config.date_policy))
    }
}
