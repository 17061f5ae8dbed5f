//! Single-writer actor for the SQLite database.
//!
//! SQLite allows one writer at a time, so every write goes through one task
//! that owns a dedicated connection and runs jobs serially, each inside an
//! immediate transaction.

use diesel::SqliteConnection;
use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::{IntoCore, StorageError};
use goaltrack_core::errors::{Error, Result};

/// Capacity of the job queue in front of the writer.
const WRITE_QUEUE_CAPACITY: usize = 256;

// A job carries its own reply channel, so the actor never sees the result type.
type WriteJob = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

/// Error type used inside a write transaction.
///
/// Keeps core errors raised by a job intact instead of flattening them into
/// Diesel errors, while still letting Diesel roll the transaction back.
enum TransactionError {
    Diesel(diesel::result::Error),
    Core(Error),
}

impl From<diesel::result::Error> for TransactionError {
    fn from(err: diesel::result::Error) -> Self {
        TransactionError::Diesel(err)
    }
}

impl From<TransactionError> for Error {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Diesel(e) => StorageError::from(e).into(),
            TransactionError::Core(e) => e,
        }
    }
}

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<WriteJob>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection inside an immediate transaction.
    ///
    /// The transaction is rolled back when the job returns an error.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel::<Result<T>>();

        let wrapped: WriteJob = Box::new(move |conn: &mut SqliteConnection| {
            let result = conn
                .immediate_transaction::<T, TransactionError, _>(|tx_conn| {
                    job(tx_conn).map_err(TransactionError::Core)
                })
                .map_err(Error::from);
            // The caller may have gone away; the write itself is already settled.
            let _ = reply_tx.send(result);
        });

        self.tx
            .send(wrapped)
            .await
            .map_err(|_| writer_unavailable("write queue is closed"))?;

        reply_rx
            .await
            .map_err(|_| writer_unavailable("writer dropped the reply"))?
    }
}

/// Spawns the background task that owns the single write connection.
///
/// The connection is taken from `pool` before spawning so that pool errors
/// surface here rather than inside the task.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let mut conn = pool.get().into_core()?;
    let (tx, mut rx) = mpsc::channel::<WriteJob>(WRITE_QUEUE_CAPACITY);

    tokio::spawn(async move {
        debug!("Writer actor started");
        while let Some(job) = rx.recv().await {
            job(&mut *conn);
        }
        // Every WriteHandle was dropped.
        debug!("Writer actor stopped");
    });

    Ok(WriteHandle { tx })
}

fn writer_unavailable(reason: &str) -> Error {
    warn!("Write rejected: {}", reason);
    StorageError::WriterUnavailable(reason.to_string()).into()
}
