//! # phud-engine: Winamax hand history ingestion
//!
//! Reads the plain-text hand histories the Winamax client writes and turns
//! them into an in-memory [`site::Site`]: players, cash games, tournaments,
//! and for each game its hands with seats, cards, actions and winners.
//!
//! ## Core Modules
//!
//! - [`cursor`] - Read-ahead line cursor over one transcript
//! - [`registry`] - Per-file player registry
//! - [`grammar`] - Line grammar of one hand
//! - [`assembler`] - One history file to one [`site::Site`]
//! - [`loader`] - Parallel loading of a whole history root, with cancellation
//! - [`history_dir`] - Layout checks and file listing for a data root
//! - [`site`], [`game`], [`hand`], [`action`], [`player`], [`cards`], [`seat`] - Entities
//! - [`amounts`] - Lenient numeric readers
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use phud_engine::assembler::parse_game_history_text;
//!
//! let text = "\
//! Winamax Poker - CashGame - HandId: #1-1-1 - Holdem no limit (1€/2€) - 2014/11/01 21:24:02 UTC
//! Table: 'Frankfurt 11' 6-max (real money) Seat #1 is the button
//! Seat 1: Alice (200€)
//! Seat 2: Hero (200€)
//! Dealt to Hero [Ah Ad]
//! Alice folds
//! Hero collected 3€ from pot
//! ";
//! let parse = parse_game_history_text("20141101_Frankfurt 11_real_holdem_no-limit.txt", text);
//! assert!(parse.fault.is_none());
//! assert_eq!(parse.site.hand_count(), 1);
//! assert_eq!(parse.site.hero(), Some("Hero"));
//! ```
//!
//! ## Loading a whole root
//!
//! ```rust,no_run
//! use std::path::Path;
//! use phud_engine::loader::{LoaderOptions, LoaderSession};
//!
//! let session = LoaderSession::new(LoaderOptions::default())
//!     .on_file_count(|n| println!("{n} files"));
//! let report = session.load(Path::new("/home/me/Winamax Poker/accounts/me"))?;
//! println!("{} games", report.site.game_count());
//! # Ok::<(), phud_engine::errors::LoadError>(())
//! ```

pub mod action;
pub mod amounts;
pub mod assembler;
pub mod cards;
pub mod cursor;
pub mod errors;
pub mod game;
pub mod grammar;
pub mod hand;
pub mod history_dir;
pub mod loader;
pub mod player;
pub mod registry;
pub mod seat;
pub mod site;
