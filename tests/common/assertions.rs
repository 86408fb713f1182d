//! Result assertions for backend calls

/// Unwrap an `Ok`, panicking with the error (and an optional label)
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("call failed: {:?}", e),
        }
    };
    ($result:expr, $label:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $label, e),
        }
    };
}

/// Take the error out of a failed call.
///
/// With a pattern, the error must also match it.
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("call succeeded with {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err(e @ $pattern) => e,
            Err(e) => panic!("wrong error: {:?}", e),
            Ok(value) => panic!("call succeeded with {:?}", value),
        }
    };
}

/// Error of a failed call, checked against an HTTP status
#[macro_export]
macro_rules! assert_status {
    ($result:expr, $status:expr) => {{
        let err = $crate::assert_err!($result);
        assert_eq!(err.status(), Some($status), "unexpected error {:?}", err);
        err
    }};
}
