use crate::{config::Config, stores::Stores};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Area state and attempt limiter.
    pub stores: Stores,
}
