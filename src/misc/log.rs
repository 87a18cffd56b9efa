/// Debug-only diagnostics; compiles to nothing in release builds.
#[macro_export]
macro_rules! log {
    ($($rest:tt)*) => {
        #[cfg(debug_assertions)]
        ::std::println!($($rest)*)
    }
}
