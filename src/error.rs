use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("Invalid Configuration: {0}")]
    Config(String),
    #[error("unknown filter policy: {0}")]
    UnknownFilterPolicy(String),
}

pub type IResult<T> = std::result::Result<T, Error>;
