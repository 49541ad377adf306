use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Registry(#[from] tickwatch_core::RegistryError),

    #[error(transparent)]
    Portfolio(#[from] crate::portfolio::PortfolioError),

    #[error(transparent)]
    Prefs(#[from] crate::prefs::PrefsError),

    #[error(transparent)]
    Fetch(#[from] tickwatch_core::FetchError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Registry(_) => 2,
            Self::Portfolio(_) => 2,
            Self::Prefs(_) => 2,
            Self::Fetch(_) => 3,
        }
    }
}
