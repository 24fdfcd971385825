pub mod resource;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0} request already in flight")]
    Busy(&'static str),
    #[error("{1}")]
    Request(&'static str, String),
}
