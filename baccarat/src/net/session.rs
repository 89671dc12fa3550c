//! Per-connection command interpreter.
//!
//! A session owns its own pending bet and cached balance and never shares
//! them. Everything else lives on the shared [`Table`].

use log::{debug, error, info, warn};
use std::sync::Arc;

use super::messages::{Command, Response};
use crate::{
    game::{
        Settlement,
        entities::{Chips, Side, Username},
    },
    table::Table,
};

/// What the connection should do after a command.
#[derive(Debug, Eq, PartialEq)]
pub enum Reply {
    /// Write this line back to the client.
    Respond(Response),
    /// Stop serving and shut the whole table down. Nothing is written.
    Shutdown,
}

#[derive(Debug)]
pub struct Session {
    table: Arc<Table>,
    username: Option<Username>,
    balance: Chips,
    pending_bet: Chips,
}

impl Session {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            username: None,
            balance: 0,
            pending_bet: 0,
        }
    }

    /// User from the most recent `login`, if any.
    #[must_use]
    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    /// Balance as of the last command that read or wrote the ledger.
    #[must_use]
    pub fn balance(&self) -> Chips {
        self.balance
    }

    #[must_use]
    pub fn pending_bet(&self) -> Chips {
        self.pending_bet
    }

    /// Parse and run one line of client input.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match Command::parse(line) {
            Ok(command) => self.handle(command),
            Err(e) => {
                debug!("Rejected {line:?}: {e}");
                Reply::Respond(Response::InvalidCommand(e))
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        debug!("Handling {command}");
        let response = match command {
            Command::Login { username, balance } => self.login(username, balance),
            Command::Bet { amount, username } => self.bet(amount, &username),
            Command::Deal { side, username } => self.deal(side, &username),
            Command::Exit => {
                info!(
                    "Exit requested by {}",
                    self.username.as_ref().map_or("anonymous", Username::as_str)
                );
                return Reply::Shutdown;
            }
            Command::Unknown(name) => Response::UnknownCommand(name),
        };
        Reply::Respond(response)
    }

    /// The client's claimed balance overwrites whatever the ledger held.
    fn login(&mut self, username: Username, balance: Chips) -> Response {
        if let Err(e) = self.table.ledger.set(&username, balance) {
            error!("Failed to record login balance: {e}");
        }
        info!("{username} logged in with {balance}");
        self.username = Some(username.clone());
        self.balance = balance;
        Response::LoggedIn { username, balance }
    }

    /// Nothing is debited here. The amount only becomes the stake settled
    /// by later deals.
    fn bet(&mut self, amount: Chips, username: &Username) -> Response {
        self.balance = self.table.ledger.balance_or_zero(username);
        if self.balance < amount {
            debug!("{username} can't cover {amount} with {}", self.balance);
            return Response::InsufficientFunds;
        }
        self.pending_bet = amount;
        Response::BetPlaced {
            username: username.clone(),
            amount,
        }
    }

    fn deal(&mut self, side: Side, username: &Username) -> Response {
        let balance = self.table.ledger.balance_or_zero(username);

        let Ok(deal) = self.table.deck.deal_hand(side) else {
            warn!("{username} can't deal, the shoe is too short");
            return Response::NotEnoughCards;
        };
        info!("{username} bet {} on {side}: {deal}", self.pending_bet);

        // The history already logged the dropped batch; the hand stands.
        if let Err(e) = self.table.history.record(deal.winner) {
            debug!("Outcome of {username}'s hand not logged: {e}");
        }

        let settlement = deal.settlement();
        let balance = settlement.apply(balance, self.pending_bet);
        if settlement != Settlement::Push
            && let Err(e) = self.table.ledger.set(username, balance)
        {
            error!("Failed to settle {username}: {e}");
        }
        self.balance = balance;

        Response::Dealt { deal, balance }
    }
}
