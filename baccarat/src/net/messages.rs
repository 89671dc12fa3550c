use std::fmt;

use super::errors::{ParseError, Result};
use crate::game::{
    Deal, Settlement,
    entities::{Chips, Side, Username},
};

/// Separates the fields of a command line.
pub const FIELD_DELIMITER: char = '|';

/// A command sent by a client, one per line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Record `balance` for `username`, overwriting whatever was there.
    Login { username: Username, balance: Chips },
    /// Stake `amount` on the next deal if `username` can cover it.
    Bet { amount: Chips, username: Username },
    /// Deal a hand with the pending bet riding on `side`.
    Deal { side: Side, username: Username },
    /// Shut the whole table down.
    Exit,
    /// Anything else. Carries the command name as sent.
    Unknown(String),
}

impl Command {
    pub const LOGIN: &'static str = "login";
    pub const BET: &'static str = "bet";
    pub const DEAL: &'static str = "deal";
    pub const EXIT: &'static str = "exit";

    /// Parse one line of client input.
    ///
    /// # Examples
    ///
    /// ```
    /// use baccarat::game::entities::{Side, Username};
    /// use baccarat::messages::Command;
    ///
    /// assert_eq!(
    ///     Command::parse("deal|P|alice"),
    ///     Ok(Command::Deal { side: Side::Player, username: Username::new("alice") })
    /// );
    /// assert_eq!(Command::parse("hello"), Ok(Command::Unknown("hello".to_string())));
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.split(FIELD_DELIMITER).map(str::trim);
        // `split` always yields at least one item.
        let name = fields.next().unwrap_or_default();

        match name {
            Self::LOGIN => {
                let username = parse_username(fields.next(), Self::LOGIN)?;
                let balance = parse_amount(fields.next(), Self::LOGIN, "balance")?;
                Ok(Self::Login { username, balance })
            }
            Self::BET => {
                let amount = parse_amount(fields.next(), Self::BET, "amount")?;
                let username = parse_username(fields.next(), Self::BET)?;
                Ok(Self::Bet { amount, username })
            }
            Self::DEAL => {
                let side = fields
                    .next()
                    .filter(|field| !field.is_empty())
                    .ok_or(ParseError::MissingField {
                        command: Self::DEAL,
                        field: "side",
                    })?
                    .parse::<Side>()?;
                let username = parse_username(fields.next(), Self::DEAL)?;
                Ok(Self::Deal { side, username })
            }
            Self::EXIT => Ok(Self::Exit),
            other => Ok(Self::Unknown(other.to_string())),
        }
    }
}

fn parse_username(field: Option<&str>, command: &'static str) -> Result<Username> {
    let field = field.ok_or(ParseError::MissingField {
        command,
        field: "username",
    })?;
    let username = Username::new(field);
    if username.is_empty() {
        return Err(ParseError::EmptyUsername);
    }
    Ok(username)
}

fn parse_amount(
    field: Option<&str>,
    command: &'static str,
    name: &'static str,
) -> Result<Chips> {
    let field = field
        .filter(|field| !field.is_empty())
        .ok_or(ParseError::MissingField {
            command,
            field: name,
        })?;
    match field.parse::<Chips>() {
        Ok(amount) if amount >= 0 => Ok(amount),
        _ => Err(ParseError::InvalidAmount(field.to_string())),
    }
}

/// Wire form, e.g. `bet|50|alice`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = FIELD_DELIMITER;
        match self {
            Self::Login { username, balance } => {
                write!(f, "{}{d}{username}{d}{balance}", Self::LOGIN)
            }
            Self::Bet { amount, username } => write!(f, "{}{d}{amount}{d}{username}", Self::BET),
            Self::Deal { side, username } => write!(f, "{}{d}{side}{d}{username}", Self::DEAL),
            Self::Exit => write!(f, "{}", Self::EXIT),
            Self::Unknown(name) => write!(f, "{name}"),
        }
    }
}

/// A single line sent back to the client.
#[derive(Debug, Eq, PartialEq)]
pub enum Response {
    LoggedIn {
        username: Username,
        balance: Chips,
    },
    BetPlaced {
        username: Username,
        amount: Chips,
    },
    /// The ledger balance doesn't cover the bet, so nothing is pending.
    InsufficientFunds,
    /// A hand was dealt. `balance` is the settled ledger balance.
    Dealt {
        deal: Deal,
        balance: Chips,
    },
    NotEnoughCards,
    UnknownCommand(String),
    InvalidCommand(ParseError),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedIn { username, balance } => {
                write!(f, "User {username} logged in with balance: {balance}")
            }
            Self::BetPlaced { username, amount } => {
                write!(f, "{username} - Bet of {amount} placed.")
            }
            Self::InsufficientFunds => write!(f, "insufficient amount"),
            Self::Dealt { deal, balance } => match deal.settlement() {
                Settlement::Won => write!(f, "{deal} Bet won. Balance updated: {balance}"),
                Settlement::Lost => write!(f, "{deal} Bet lost. Balance remains: {balance}"),
                Settlement::Push => write!(f, "{deal}. It's a draw. Bet refunded."),
            },
            Self::NotEnoughCards => write!(f, "Not enough cards to deal."),
            Self::UnknownCommand(name) => write!(f, "Unknown command: {name}"),
            Self::InvalidCommand(error) => write!(f, "Invalid command: {error}"),
        }
    }
}
