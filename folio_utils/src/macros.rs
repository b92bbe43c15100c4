/// Asserts that a value matches a pattern, with an optional guard.
///
/// Bindings in the guard refer to the value by reference.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {{
        let value = &$expr;
        #[allow(unused_variables, reason = "bindings are only used by the guard")]
        let matched = match value {
            $pat $(if $guard)? => true,
            _ => false,
        };
        ::core::assert!(
            matched,
            "value {value:?} does not match `{}`",
            ::core::stringify!($pat $(if $guard)?),
        );
    }};
}
