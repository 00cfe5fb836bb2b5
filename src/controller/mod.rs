//! Menu controller module
//!
//! This module implements the top-level state machine of the program.
//!
//! # States
//!
//! ```text
//! FirstStart ──ok──▶ MainMenu ◀──save/back── EditMenu
//!     │                 │  ▲                     ▲
//!     │ cancel/         │  └── session ends      │
//!     │ not writeable   ├────────────────────────┘
//!     ▼                 ▼
//! Exiting(1)     Exiting(0 | 1)
//! ```
//!
//! - `FirstStart` runs only when no configuration section exists.
//! - Sessions block the loop until the child process exits, whatever its status.
//! - A missing remote desktop client ends the program with status 1.

pub mod menu_controller;

pub use menu_controller::{EditAction, MainAction, MenuController, State};
