#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub database: Database,
}

#[derive(Clone)]
pub struct Database {
    pub url: String,
}

// Connection strings carry the password.
impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("url", &"<redacted>").finish()
    }
}
