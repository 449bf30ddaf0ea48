#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("static pattern compiles"));
        &*RE
    }};
}

/// Declares a pubdate [`Rule`](crate::rules::Rule): a name, a literal
/// pattern and a rewrite over the first match's captures.
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:literal,
        rewrite: $rewrite:expr
        $(,)?
    ) => {{
        $crate::rules::Rule { name: $name, pattern: $crate::regex!($pat), rewrite: $rewrite }
    }};
}
