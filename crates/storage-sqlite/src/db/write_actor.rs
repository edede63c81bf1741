use super::{DbConnection, DbPool};
use crate::errors::StorageError;
use dematfolio_core::errors::{DatabaseError, Error, Result};
use diesel::SqliteConnection;
use log::{debug, error};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job runs against the actor's connection and returns a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection inside an IMMEDIATE transaction.
    ///
    /// The transaction commits when the job returns `Ok` and rolls back
    /// otherwise, so every job is atomic on its own.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_stopped())?;

        let boxed = ret_rx.await.map_err(|_| writer_stopped())??;
        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "Writer returned a value of an unexpected type".to_string(),
            ))
        })
    }
}

fn writer_stopped() -> Error {
    Error::Database(DatabaseError::Internal(
        "Database writer is not running".to_string(),
    ))
}

/// Spawns the single database writer on the current Tokio runtime.
///
/// The actor holds one pooled connection for its whole life and processes
/// jobs strictly one after another. It stops when every `WriteHandle` has
/// been dropped.
pub fn spawn_writer(pool: &DbPool) -> Result<WriteHandle> {
    let conn = super::get_connection(pool)?;
    let (tx, rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);
    tokio::spawn(run_writer(conn, rx));
    Ok(WriteHandle { tx })
}

async fn run_writer(mut conn: DbConnection, mut rx: mpsc::Receiver<(ErasedJob, Reply)>) {
    while let Some((job, reply_tx)) = rx.recv().await {
        let result: Result<Box<dyn Any + Send + 'static>> = conn
            .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
            .map_err(|e| {
                let err: Error = e.into();
                if matches!(err, Error::Database(_)) {
                    error!("Write transaction rolled back: {}", err);
                }
                err
            });

        // The caller may have gone away (request cancelled); nothing to do then.
        let _ = reply_tx.send(result);
    }
    debug!("Database writer stopped");
}
