//! Process exit codes.
//! Part of the CLI contract; scripts branch on them.

use shipout::ShipoutError;

pub const SUCCESS: i32 = 0;
pub const REQUEST_FAILED: i32 = 1; // Business error or rejected parameters
pub const CONFIG_ERROR: i32 = 2; // Missing credentials or unusable config
pub const TRANSPORT_ERROR: i32 = 3; // Network, HTTP status or undecodable body

/// The library owns the classification; these constants name its codes.
pub fn for_error(err: &ShipoutError) -> i32 {
    err.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipout::ErrorKind;

    #[test]
    fn test_codes_match_library_classification() {
        let cases = [
            (ErrorKind::Business, REQUEST_FAILED),
            (ErrorKind::Validation, REQUEST_FAILED),
            (ErrorKind::Config, CONFIG_ERROR),
            (ErrorKind::Transport, TRANSPORT_ERROR),
            (ErrorKind::Decode, TRANSPORT_ERROR),
        ];

        let decode: ShipoutError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        let samples = [
            ShipoutError::Business(shipout::WrappedError::new("E1", ["bad"])),
            ShipoutError::Validation {
                message: "x".into(),
            },
            ShipoutError::Config {
                message: "x".into(),
            },
            ShipoutError::Network {
                message: "x".into(),
            },
            decode,
        ];

        for ((kind, code), err) in cases.into_iter().zip(samples.iter()) {
            assert_eq!(err.kind(), kind);
            assert_eq!(for_error(err), code, "Failed for {:?}", kind);
        }
    }
}
