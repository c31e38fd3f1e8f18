// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command module - one runner per subcommand

pub mod kinds;
pub mod print;
