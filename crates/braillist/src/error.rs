#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Space factor {0} is outside the accepted range 1.0..=2.0")]
    SpaceFactor(f32),

    #[error("Unknown language in [corrections]: {0}")]
    UnknownLanguage(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("No input given and nothing on stdin")]
    MissingInput,
}
