use snafu::Snafu;

/// # engine errors
/// every error in here is a structural fault: the page did not have the shape
/// the parsers expect, or it could not be loaded at all. faults in a single
/// record, row, or header are never turned into an `Error`, they are skipped
/// where they occur.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("archive container not found (selector: {selector})"))]
    ContainerNotFoundError { selector: String },

    #[snafu(display("results table not found (selector: {selector})"))]
    TableNotFoundError { selector: String },

    #[snafu(display("embedded object `{variable}` not found in page"))]
    ObjectNotFoundError { variable: String },

    #[snafu(display("embedded object is not valid json: {source}"))]
    InvalidJsonError { source: serde_json::Error },

    #[snafu(display("embedded object `{variable}` is not a json object"))]
    NotAnObjectError { variable: String },

    #[snafu(display("invalid css selector `{selector}`: {reason}"))]
    InvalidSelectorError { selector: String, reason: String },

    #[snafu(display("request to {url} failed: {source}"))]
    RequestError { url: String, source: reqwest::Error },

    #[snafu(display("could not read {path}: {source}"))]
    ReadFileError {
        path: String,
        source: std::io::Error,
    },
}

pub type CustomResult<T> = Result<T, Error>;
