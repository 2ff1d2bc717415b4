use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown operating system `{0}`")]
    UnknownOs(String),

    #[error("unsupported host: {os}/{arch} is not a platform cmkup knows how to describe")]
    UnsupportedHost {
        os: &'static str,
        arch: &'static str,
    },
}
