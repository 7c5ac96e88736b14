//! Test utility macros for Forkful.
//!
//! These macros replace `unwrap()`/`expect()` with proper error handling in
//! tests. They provide better error messages with file and line information.

/// Unwrap a `Result`, failing the test with a descriptive message if `Err`.
///
/// # Examples
///
/// ```rust
/// use forkful::unwrap_ok;
///
/// let result: Result<i32, &str> = Ok(42);
/// let value = unwrap_ok!(result);
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! unwrap_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => panic!("{}:{} - Expected Ok, got Err: {:?}", file!(), line!(), e),
        }
    };
    ($expr:expr, $msg:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => panic!("{}:{} - {}: {:?}", file!(), line!(), $msg, e),
        }
    };
}

/// Unwrap an `Option`, failing the test with a descriptive message if `None`.
///
/// # Examples
///
/// ```rust
/// use forkful::unwrap_some;
///
/// let option: Option<i32> = Some(42);
/// let value = unwrap_some!(option);
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! unwrap_some {
    ($expr:expr) => {
        match $expr {
            Some(val) => val,
            None => panic!("{}:{} - Expected Some, got None", file!(), line!()),
        }
    };
    ($expr:expr, $msg:expr) => {
        match $expr {
            Some(val) => val,
            None => panic!("{}:{} - {}: got None", file!(), line!(), $msg),
        }
    };
}

/// Assert that a `Result` is `Ok` and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {{
        let result = $expr;
        match &result {
            Ok(_) => {}
            Err(e) => panic!("{}:{} - Expected Ok, got Err: {:?}", file!(), line!(), e),
        }
        // SAFETY: We just verified it's Ok above
        #[allow(clippy::unwrap_used)]
        result.unwrap()
    }};
}

/// Assert that a `Result` is `Err`.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {{
        let result = $expr;
        if result.is_ok() {
            panic!(
                "{}:{} - Expected Err, got Ok: {:?}",
                file!(),
                line!(),
                result.ok()
            );
        }
    }};
}
