//! Board-level test suites.

mod draw;
mod props;
