//! Convenience macros for early returns with `LearnboardError`

/// Equivalent to `anyhow::bail!` but for `LearnboardError`
///
/// # Examples
///
/// ```rust
/// use learnboard_common::bail;
/// use learnboard_common::Result;
///
/// fn check_percentage(value: u8) -> Result<()> {
///     if value > 100 {
///         bail!("Percentage out of range: {}", value);
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::LearnboardError::new($msg))
    };
    ($err:expr $(,)?) => {
        return Err($crate::LearnboardError::new($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::LearnboardError::new(format!($fmt, $($arg)*)))
    };
}

/// Equivalent to `anyhow::ensure!` but for `LearnboardError`
///
/// # Examples
///
/// ```rust
/// use learnboard_common::ensure;
/// use learnboard_common::Result;
///
/// fn validate_attempts(attempts: u32) -> Result<()> {
///     ensure!(attempts > 0, "Attempts must be positive, got: {}", attempts);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::LearnboardError::new($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($crate::LearnboardError::new($err));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::LearnboardError::new(format!($fmt, $($arg)*)));
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Result;

    fn positive(value: i64) -> Result<i64> {
        crate::ensure!(value > 0, "value must be positive, got {}", value);
        Ok(value)
    }

    fn never_zero(value: i64) -> Result<i64> {
        if value == 0 {
            crate::bail!("zero is not allowed");
        }
        Ok(value)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(positive(3).unwrap(), 3);
        let err = positive(-1).unwrap_err();
        assert_eq!(err.to_string(), "value must be positive, got -1");
    }

    #[test]
    fn test_bail_macro() {
        assert!(never_zero(1).is_ok());
        assert_eq!(never_zero(0).unwrap_err().to_string(), "zero is not allowed");
    }
}
