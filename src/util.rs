/// Returns early from the enclosing function with an error.
///
/// `raise!(EvalError::DivisionByZero)` returns the value itself,
/// `raise!(EvalError::MalformedExpression, "not enough operands")` builds a
/// tuple variant from a message, and extra arguments are passed to `format!`.
macro_rules! raise {
    ($x:expr) => {
        return ::std::result::Result::Err($x.into())
    };
    ($x:expr, $msg:expr) => {{
        let msg = $msg.into();
        raise!($x(msg))
    }};
    ($x:expr, $format:expr, $( $arg:expr),* ) => {
        raise!($x, format!($format, $($arg),*))
    };
}
