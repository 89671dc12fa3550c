//! Drives the built `bacc_server` binary end to end.

use baccarat::{
    Client,
    entities::{Side, Username},
};
use std::{
    fs,
    net::{SocketAddr, TcpListener},
    process::{Child, Command},
    thread,
    time::{Duration, Instant},
};

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn start_server(dir: &tempfile::TempDir, extra: &[&str]) -> (Child, SocketAddr) {
    let port = free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_bacc_server"))
        .arg("--data-dir")
        .arg(dir.path())
        .args(extra)
        .arg(port.to_string())
        .env("RUST_LOG", "warn")
        .spawn()
        .unwrap();
    (child, SocketAddr::from(([127, 0, 0, 1], port)))
}

fn connect(addr: &SocketAddr) -> Client {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        match Client::connect(addr) {
            Ok(client) => return client,
            Err(e) if Instant::now() > deadline => panic!("server never came up: {e}"),
            Err(_) => thread::sleep(Duration::from_millis(50)),
        }
    }
}

fn wait_for_exit(child: &mut Child) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while child.try_wait().unwrap().is_none() {
        assert!(Instant::now() < deadline, "server didn't stop after exit");
        thread::sleep(Duration::from_millis(50));
    }
}

#[test]
fn test_fresh_shoe_session_and_exit() {
    let dir = tempfile::tempdir().unwrap();
    let (mut child, addr) = start_server(&dir, &[]);
    let alice = Username::new("alice");

    let mut client = connect(&addr);
    assert_eq!(
        client.login(&alice, 500).unwrap(),
        "User alice logged in with balance: 500"
    );
    assert_eq!(client.bet(100, &alice).unwrap(), "alice - Bet of 100 placed.");
    let response = client.deal(Side::Banker, &alice).unwrap();
    assert!(response.starts_with("P|"), "{response}");

    client.exit().unwrap();
    wait_for_exit(&mut child);

    let shoe = fs::read_to_string(dir.path().join("cards.db")).unwrap();
    let remaining = shoe.lines().count();
    assert!((46..=48).contains(&remaining), "{remaining} cards left");
    assert!(dir.path().join("game_history.csv").exists());
    assert!(dir.path().join("alice.db").exists());
}

#[test]
fn test_resume_existing_shoe() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cards.db"), "10.1\n9.1\n7.1\n4.1\n10.2\n").unwrap();
    let (mut child, addr) = start_server(&dir, &["--resume"]);
    let bob = Username::new("bob");

    let mut client = connect(&addr);
    client.login(&bob, 10).unwrap();
    assert_eq!(
        client.deal(Side::Player, &bob).unwrap(),
        "P|10.1|7.1,B|9.1|4.1|10.2 - Player wins with 7 points. Bet won. Balance updated: 10"
    );
    assert_eq!(client.deal(Side::Player, &bob).unwrap(), "Not enough cards to deal.");

    client.exit().unwrap();
    wait_for_exit(&mut child);
}
