#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use color_eyre::eyre;
pub use prefab_testhelpers_macros::test;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use std::io::Write;
use std::sync::Once;

/// Environment variable holding the log level for tests.
pub const LOG_ENV: &str = "PREFAB_LOG";

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_style = match record.level() {
            Level::Error => Style::new().fg_rgb::<243, 139, 168>(), // Catppuccin red (Maroon)
            Level::Warn => Style::new().fg_rgb::<249, 226, 175>(),  // Catppuccin yellow (Peach)
            Level::Info => Style::new().fg_rgb::<166, 227, 161>(),  // Catppuccin green (Green)
            Level::Debug => Style::new().fg_rgb::<137, 180, 250>(), // Catppuccin blue (Blue)
            Level::Trace => Style::new().fg_rgb::<148, 226, 213>(), // Catppuccin teal (Teal)
        };

        eprintln!(
            "{} - {}: {}",
            record.level().style(level_style),
            record
                .target()
                .style(Style::new().fg_rgb::<137, 180, 250>()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Reads the level from [`LOG_ENV`]. Unset or unparsable means `Info`.
pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the color-eyre hook (except on miri) and a simple logger. Only
/// the first call in a process does anything.
pub fn setup() {
    static SETUP: Once = Once::new();
    SETUP.call_once(|| {
        #[cfg(not(miri))]
        {
            use color_eyre::config::HookBuilder;
            use regex::Regex;
            use std::sync::LazyLock;

            /// Frames from the panic machinery, the test harness and thread
            /// startup.
            static IGNORE_FRAMES: LazyLock<Option<Regex>> = LazyLock::new(|| {
                Regex::new(r"^(std::panic|core::panic|test::run_test|__pthread_cond_wait|std::sys::(pal|backtrace)|std::thread::Builder|core::ops::function|test::__rust_begin_short_backtrace|<core::panic::|<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once)")
                    .ok()
            });

            let eyre_filter = move |frames: &mut Vec<&color_eyre::config::Frame>| {
                let Some(ignore) = IGNORE_FRAMES.as_ref() else {
                    return;
                };
                frames.retain(|frame| {
                    frame
                        .name
                        .as_ref()
                        .map(|n| !ignore.is_match(&n.to_string()))
                        .unwrap_or(true)
                });
            };

            // Another test harness may have installed a hook already.
            let _ = HookBuilder::default()
                .add_frame_filter(Box::new(eyre_filter))
                .install();
        }

        if log::set_boxed_logger(Box::new(SimpleLogger)).is_ok() {
            log::set_max_level(level_from_env());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[::core::prelude::v1::test]
    fn setup_twice_is_fine() {
        setup();
        setup();
    }
}
