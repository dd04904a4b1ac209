//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use crate::core::gateway::{
    DEFAULT_BASE_URL, DEFAULT_COLLECTION, DEFAULT_DATABASE, FirestoreSettings,
};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase project that owns the lead collection
    /// Example: acme-sales-1a2b3
    pub project_id: Option<String>,

    /// Firebase Web API key, sent with every Firestore request
    pub api_key: Option<String>,

    /// Firestore database id
    pub database: String,

    /// Collection receiving lead documents
    pub collection: String,

    /// Firestore REST root, override to point at the emulator
    /// Example: http://localhost:8080/v1
    pub base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    /// Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            project_id: var("FIREBASE_PROJECT_ID"),
            api_key: var("FIREBASE_API_KEY"),
            database: var("FIRESTORE_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            collection: var("FIRESTORE_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            base_url: var("FIRESTORE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Check if the lead store is configured
    pub fn has_lead_store(&self) -> bool {
        self.project_id.is_some()
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Firestore connection settings, if a project is configured
    pub fn firestore_settings(&self) -> Option<FirestoreSettings> {
        let project_id = self.project_id.as_ref()?;

        let settings = FirestoreSettings::new(project_id.clone())
            .base_url(self.base_url.clone())
            .database(self.database.clone())
            .collection(self.collection.clone());

        Some(match &self.api_key {
            Some(key) => settings.api_key(key.clone()),
            None => settings,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
