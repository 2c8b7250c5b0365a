//! Error type shared by the query builders, scrapers and outputs.

use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Caller supplied a value the operation cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    HttpStatus { status: StatusCode, url: String },
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let e = Error::InvalidArgument("keyword is required".to_string());
        assert_eq!(e.to_string(), "invalid argument: keyword is required");
    }

    #[test]
    fn test_http_status_message() {
        let e = Error::HttpStatus {
            status: StatusCode::FORBIDDEN,
            url: "https://www.meetup.com/find/?keywords=ai".to_string(),
        };
        assert!(e.to_string().contains("403"));
        assert!(e.to_string().contains("keywords=ai"));
    }
}
