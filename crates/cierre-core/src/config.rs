/// Environment-backed configuration loading.
///
/// Service config structs derive `serde::Deserialize`, implement this trait,
/// and call `from_env()` once at startup.
///
/// # Panics
///
/// Panics if a required env var is missing or cannot be parsed.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        envy::from_env().expect("failed to load config from environment")
    }
}
