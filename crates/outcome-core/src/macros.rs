/// Creates an [`Error`](crate::Error) with full call-site metadata.
///
/// Like [`Error::new`](crate::Error::new), but `member_name` is also filled
/// with the path of the enclosing function.
///
/// ```
/// let error = outcome_core::domain_error!("User.NotFound", "no such user");
/// assert_eq!(error.code(), "User.NotFound");
/// assert!(error.member_name().ends_with("main"));
///
/// let error = outcome_core::domain_error!("no such user");
/// assert_eq!(error.code(), "");
/// ```
#[macro_export]
macro_rules! domain_error {
    ($code:expr, $message:expr $(,)?) => {
        $crate::Error::new($code, $message).in_member($crate::__enclosing_fn!())
    };
    ($message:expr $(,)?) => {
        $crate::Error::from_message($message).in_member($crate::__enclosing_fn!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __enclosing_fn {
    () => {{
        fn f() {}
        $crate::__private::enclosing_fn_name(::std::any::type_name_of_val(&f))
    }};
}

/// Turns the type name of a probe fn into the path of the fn enclosing it.
#[doc(hidden)]
#[must_use]
pub fn enclosing_fn_name(probe: &'static str) -> &'static str {
    let mut name = probe.strip_suffix("::f").unwrap_or(probe);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}
