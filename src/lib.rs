//! # prayertimes
//!
//! Astronomical prayer time calculation for a location and date.
//!
//! The library is organized into a few layers:
//!
//! - **Astronomy**: `astro` turns an instant into solar declination, equation of
//!   time, transit, and the hour angle at which the sun reaches an altitude
//! - **Prayer times**: `prayer` holds the calculation methods, caller configuration,
//!   the iterative refinement, and the staged `Calculator` → `DatedCalculator` facade
//! - **Configuration**: `config` loads and validates `prayertimes.toml`
//! - **Infrastructure**: argument parsing, shared constants, and logging
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use prayertimes::prayer::{PrayerConfig, Target};
//!
//! let calculator = PrayerConfig {
//!     latitude: 21.4225,
//!     longitude: 39.8262,
//!     ..PrayerConfig::default()
//! }
//! .finalize();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let dated = calculator.set_date(date, &chrono_tz::Asia::Riyadh);
//! let maghrib = dated.calculate(Target::Maghrib);
//! assert!(maghrib.is_available());
//! ```

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod astro;
pub mod common;
pub mod config;
pub mod prayer;

pub use config::Config;
pub use prayer::{Calculator, DatedCalculator, PrayerConfig, PrayerTime, Target};
