//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`nucleo_l476` feature): Uses defmt
//! - Host tests: Uses println!
//! - Host non-test: No-op
//!
//! The scheduler and tasks log through these macros so the core stays free
//! of a hard dependency on any one transport.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "nucleo_l476")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "nucleo_l476"), test))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "nucleo_l476")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "nucleo_l476"), test))]
        println!("[WARN] {}", format!($($arg)*));
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "nucleo_l476")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "nucleo_l476"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "nucleo_l476")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "nucleo_l476"), test))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}
