//! # Baccarat
//!
//! A multi-client Baccarat table served over TCP.
//!
//! Every connected client deals from one shared shoe. Each command is a
//! single line of `|` separated fields and gets a single line back.
//!
//! ## Core Modules
//!
//! - [`game`]: Cards, hands and the dealing and scoring engine
//! - [`table`]: The shared shoe, outcome history and balance ledger
//! - [`net`]: Networking components (server, session, client, text protocol)
//!
//! ## Example
//!
//! ```
//! use baccarat::game::{deal, entities::{Card, Side, Winner}};
//!
//! let shoe: Vec<Card> = ["10.1", "9.1", "7.1", "4.1", "10.2"]
//!     .iter()
//!     .map(|r| r.parse().unwrap())
//!     .collect();
//! let hand = deal(shoe, Side::Player).unwrap();
//! assert_eq!(hand.winner, Winner::Player);
//! ```

/// Networking components for client-server communication.
pub mod net;
pub use net::{client::Client, messages, server, session, utils};

/// Game rules, entities and the scoring engine.
pub mod game;
pub use game::{
    constants,
    entities::{self, Card, Chips, Side, Username, Winner},
};

/// Shared table resources.
pub mod table;
pub use table::{Table, TableConfig};
