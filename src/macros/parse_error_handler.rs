/// log a failed parse or fetch under `$target` and return the error to the caller
macro_rules! log_parse_error {
    ( $data:expr, $target:expr, $type_str:expr) => {
        match $data {
            Ok(e) => e,
            Err(error) => {
                error!(target:$target, "Error getting {}. (error: {})", $type_str, error);
                return Err(error);
            }
        }
    }
}

pub(crate) use log_parse_error;
