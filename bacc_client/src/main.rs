//! Interactive line client for a baccarat table server.
//!
//! Reads commands from stdin, sends each one as-is and prints the single
//! line the server answers with.

use anyhow::{Context, Result, bail};
use baccarat::{Client, messages::Command};
use pico_args::Arguments;
use std::{
    io::{self, BufRead, Write},
    net::{SocketAddr, ToSocketAddrs},
};

const HELP: &str = "\
Connect to a baccarat table server

USAGE:
  bacc_client HOST:PORT

COMMANDS:
  login|NAME|BALANCE    Record a balance for NAME
  bet|AMOUNT|NAME       Stake AMOUNT on the next deal
  deal|P or B|NAME      Deal a hand with the bet on player or banker
  exit                  Stop the server and quit

FLAGS:
  -h, --help            Print help information
";

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let Some(target) = pargs.opt_free_from_str::<String>()? else {
        bail!("missing server address\n\n{HELP}");
    };
    let addr = resolve(&target)?;

    let client = Client::connect(&addr)?;
    println!("Connected to server at {addr}");

    let stdin = io::stdin();
    repl(client, stdin.lock(), io::stdout())
}

fn resolve(target: &str) -> Result<SocketAddr> {
    target
        .to_socket_addrs()
        .with_context(|| format!("invalid server address {target:?}"))?
        .next()
        .with_context(|| format!("{target:?} didn't resolve to any address"))
}

/// Relay lines from `input` until it ends or the user types `exit`.
fn repl<R: BufRead, W: Write>(mut client: Client, mut input: R, mut output: W) -> Result<()> {
    loop {
        write!(output, "Enter command: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == Command::EXIT {
            writeln!(output, "exiting..")?;
            return client.exit();
        }

        let response = client.send_line(line)?;
        writeln!(output, "Server response: {response}")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{BufReader, Cursor},
        net::TcpListener,
        thread,
    };

    /// A one-connection server that answers each line with `echo:<line>`
    /// and returns everything it received.
    fn echo_server() -> (SocketAddr, thread::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut writer = stream.try_clone().unwrap();
            let mut received = Vec::new();
            for line in BufReader::new(stream).lines() {
                let line = line.unwrap();
                if line != "exit" {
                    writeln!(writer, "echo:{line}").unwrap();
                }
                received.push(line);
            }
            received
        });
        (addr, handle)
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("127.0.0.1:3000").unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
        assert!(resolve("no-port").is_err());
    }

    #[test]
    fn test_repl_relays_until_exit() {
        let (addr, server) = echo_server();
        let client = Client::connect(&addr).unwrap();
        let input = Cursor::new("login|alice|10\n\nbet|5|alice\nexit\ndeal|P|alice\n");
        let mut output = Vec::new();

        repl(client, input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Server response: echo:login|alice|10\n"));
        assert!(output.contains("Server response: echo:bet|5|alice\n"));
        assert!(output.ends_with("exiting..\n"));
        assert_eq!(server.join().unwrap(), vec!["login|alice|10", "bet|5|alice", "exit"]);
    }

    #[test]
    fn test_repl_stops_at_end_of_input() {
        let (addr, server) = echo_server();
        let client = Client::connect(&addr).unwrap();
        let mut output = Vec::new();

        repl(client, Cursor::new("deal|B|bob\n"), &mut output).unwrap();

        assert!(String::from_utf8(output).unwrap().contains("Server response: echo:deal|B|bob"));
        assert_eq!(server.join().unwrap(), vec!["deal|B|bob"]);
    }
}
