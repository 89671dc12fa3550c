//! Async TCP table server.
//!
//! Every accepted connection gets its own task and its own [`Session`].
//! At most `max_workers` sessions are served at once; connections beyond
//! that are accepted and wait for a free slot. Commands are synchronous
//! file and lock work, so each one runs on the blocking pool.

use anyhow::Error;
use log::{debug, info, warn};
use std::{io, net::SocketAddr, sync::Arc};
use tokio::{
    io::BufReader,
    net::{TcpListener, TcpStream},
    sync::{Notify, Semaphore},
    task,
};

use super::{
    errors::ParseError,
    messages::Response,
    session::{Reply, Session},
    utils::{self, MAX_LINE_LENGTH},
};
use crate::table::Table;

/// Bind `addr` and serve `table` until a client sends `exit`.
///
/// # Errors
///
/// Returns an error if the address can't be bound.
pub async fn run(addr: SocketAddr, table: Arc<Table>, max_workers: usize) -> Result<(), Error> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    serve(listener, table, max_workers).await
}

/// Serve connections from an already bound listener until a client sends
/// `exit`. Sessions still running at that point are dropped along with the
/// runtime.
pub async fn serve(
    listener: TcpListener,
    table: Arc<Table>,
    max_workers: usize,
) -> Result<(), Error> {
    let slots = Arc::new(Semaphore::new(max_workers));
    let shutdown = Arc::new(Notify::new());

    loop {
        tokio::select! {
            () = shutdown.notified() => {
                info!("Exit requested, shutting down");
                break;
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!("Failed to accept connection: {e}");
                        continue;
                    }
                };
                let table = Arc::clone(&table);
                let slots = Arc::clone(&slots);
                let shutdown = Arc::clone(&shutdown);
                tokio::spawn(async move {
                    // The semaphore is never closed.
                    let Ok(_slot) = slots.acquire_owned().await else {
                        return;
                    };
                    info!("{peer} connected");
                    match handle_connection(stream, table, &shutdown).await {
                        Ok(()) => info!("{peer} disconnected"),
                        Err(e) => warn!("{peer} dropped: {e}"),
                    }
                });
            }
        }
    }

    Ok(())
}

async fn handle_connection(
    stream: TcpStream,
    table: Arc<Table>,
    shutdown: &Notify,
) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut session = Session::new(table);

    loop {
        let line = match utils::read_line_async(&mut reader).await {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                // No way to find the start of the next command, so give up
                // on the connection after telling the client why.
                let response = Response::InvalidCommand(ParseError::LineTooLong {
                    max: MAX_LINE_LENGTH,
                });
                utils::write_line_async(&mut writer, &response.to_string()).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        debug!("Received {line:?}");

        let (returned, reply) = task::spawn_blocking(move || {
            let reply = session.handle_line(&line);
            (session, reply)
        })
        .await
        .map_err(io::Error::other)?;
        session = returned;

        match reply {
            Reply::Respond(response) => {
                utils::write_line_async(&mut writer, &response.to_string()).await?;
            }
            Reply::Shutdown => {
                shutdown.notify_one();
                return Ok(());
            }
        }
    }
}
