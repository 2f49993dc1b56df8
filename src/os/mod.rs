cfg_if::cfg_if! {
    if #[cfg(windows)]{
        pub(crate) mod windows;
        pub use windows::Library;
        pub(crate) use windows::open;
    }else if #[cfg(unix)]{
        pub(crate) mod unix;
        pub use unix::Library;
        pub(crate) use unix::open;
    }else {
        pub(crate) mod unsupported;
        pub use unsupported::Library;
        pub(crate) use unsupported::open;
    }
}

#[cfg(all(test, any(unix, windows)))]
#[allow(unused)]
mod unsupported;
