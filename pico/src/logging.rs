//! Logging macros shared by the library modules.
//!
//! - ARM firmware: forwards to `defmt`
//! - Host tests: prints to stdout
//! - Host non-test: no-op
//!
//! Only `{}` placeholders with primitive or `&str` arguments are used so the
//! same format string is valid for both `defmt` and `core::fmt`.

macro_rules! log_info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::info!($fmt $(, $arg)*);

        #[cfg(all(not(target_arch = "arm"), test))]
        println!(concat!("[INFO] ", $fmt) $(, $arg)*);

        #[cfg(all(not(target_arch = "arm"), not(test)))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

macro_rules! log_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::warn!($fmt $(, $arg)*);

        #[cfg(all(not(target_arch = "arm"), test))]
        println!(concat!("[WARN] ", $fmt) $(, $arg)*);

        #[cfg(all(not(target_arch = "arm"), not(test)))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

macro_rules! log_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::debug!($fmt $(, $arg)*);

        #[cfg(all(not(target_arch = "arm"), test))]
        println!(concat!("[DEBUG] ", $fmt) $(, $arg)*);

        #[cfg(all(not(target_arch = "arm"), not(test)))]
        {
            $(let _ = &$arg;)*
        }
    }};
}
