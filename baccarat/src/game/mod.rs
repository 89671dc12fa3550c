//! Baccarat game rules.
//!
//! This module provides:
//! - Card, shoe, side and username entities
//! - The dealing and scoring engine for a single hand
//! - Rule constants

pub mod constants;
pub mod engine;
pub mod entities;

pub use engine::{Deal, Hand, InsufficientCards, Settlement, deal, normalize};
