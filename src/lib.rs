//! Library to calculate difficulty and performance attributes of [osu!] charts
//! in the osu!standard game mode.
//!
//! ## Description
//!
//! Charts are parsed from the `.osu` file format into a [`Beatmap`]. Mods are
//! applied on a copy of the chart before strain based skills (aim, speed,
//! flashlight, rhythm) derive the star rating. A performance calculation then
//! combines those difficulty attributes with the hit results of a play.
//!
//! ## Usage
//!
//! ```no_run
//! use beatmap_pp::{Beatmap, DifficultyParameters, GameMods, Mod, OsuDifficulty};
//!
//! # fn main() -> Result<(), beatmap_pp::ParseError> {
//! // Parse the chart. Charts of other game modes are rejected with `None`.
//! let Some(map) = Beatmap::from_path("./resources/jumps.osu")? else {
//!     return Ok(());
//! };
//!
//! // Calculate difficulty attributes
//! let mods = GameMods::NONE.with(Mod::Hidden).with(Mod::HardRock);
//!
//! let diff_attrs = OsuDifficulty::new(&map)
//!     .params(DifficultyParameters::new().mods(mods))
//!     .calculate();
//!
//! let stars = diff_attrs.stars;
//!
//! // Calculate performance attributes
//! let perf_attrs = diff_attrs
//!     .performance()
//!     .combo(789)
//!     .accuracy(99.2)
//!     .misses(2)
//!     .calculate();
//!
//! println!("Stars: {stars} | PP: {}", perf_attrs.pp);
//! # Ok(()) }
//! ```
//!
//! ## Caching
//!
//! A [`DifficultyCache`] memoizes difficulty attributes by the chart's MD5
//! hash and the mods that affect difficulty. It can be shared between threads.
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | Enables the `tracing` feature |
//! | `tracing` | Lines that fail to parse are logged through `tracing::warn`, cache activity through `tracing::debug`. If this feature is not enabled, nothing is logged. | [`tracing`]
//! | `async_tokio` | Parse charts from async readers through tokio | [`tokio`]
//! | `async_std` | Parse charts from async readers through async-std | [`async-std`]
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`tracing`]: https://docs.rs/tracing
//! [`tokio`]: https://docs.rs/tokio
//! [`async-std`]: https://docs.rs/async-std

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[macro_use]
mod util;

#[doc(inline)]
pub use self::{
    cache::DifficultyCache,
    model::{
        beatmap::Beatmap,
        mods::{DifficultyParameters, GameMods, Mod, ParseModsError},
    },
    osu::{
        calculate_difficulty, calculate_timed_difficulty, OsuDifficulty, OsuDifficultyAttributes,
        OsuPerformance, OsuPerformanceAttributes, OsuScoreState, TimedDifficultyAttributes,
    },
    parse::{ParseBeatmapError, ParseError, ParseOptions, ParseResult},
};

/// Types used in and around this crate.
pub mod model;

/// Parsing charts from the `.osu` format.
pub mod parse;

/// Types for osu!standard calculations.
pub mod osu;

/// Memoization of difficulty attributes.
pub mod cache;
