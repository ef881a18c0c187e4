//! Background persistence of freshly fetched patient records.
//!
//! Resolution returns to the caller before its record is written to the store. Records are handed
//! to a single worker task over an unbounded channel. Every enqueued record gets exactly one
//! insert attempt; there is no ordering relative to the response, no retry and no timeout.
//! Failures are logged and dropped.

use crate::store::Store;
use identity_records::PatientRecord;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug)]
struct WriteBackJob {
    job_id: Uuid,
    patient: PatientRecord,
}

/// Sending half of the write-back queue. Cheap to clone.
#[derive(Clone, Debug)]
pub struct WriteBack {
    sender: mpsc::UnboundedSender<WriteBackJob>,
}

impl WriteBack {
    /// Starts the worker on the current tokio runtime.
    ///
    /// The worker exits once every `WriteBack` clone has been dropped and the queue is drained,
    /// so awaiting the returned handle after dropping the senders waits for all pending writes.
    pub fn spawn(store: Arc<dyn Store>) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<WriteBackJob>();

        let handle = tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                match store.insert_patient(&job.patient).await {
                    Ok(()) => tracing::debug!(
                        job_id = %job.job_id,
                        id_number = job.patient.id_number.as_deref().unwrap_or_default(),
                        "patient written back"
                    ),
                    Err(e) => tracing::warn!(
                        job_id = %job.job_id,
                        id_number = job.patient.id_number.as_deref().unwrap_or_default(),
                        error = %e,
                        "failed to write back patient"
                    ),
                }
            }
            tracing::debug!("write-back worker stopped");
        });

        tracing::info!("patient write-back queue initialized");
        (Self { sender }, handle)
    }

    /// Queues `patient` for insertion. Never blocks and never fails the caller.
    pub fn enqueue(&self, patient: PatientRecord) {
        let job = WriteBackJob {
            job_id: Uuid::new_v4(),
            patient,
        };
        let job_id = job.job_id;
        if self.sender.send(job).is_err() {
            tracing::error!(%job_id, "write-back worker is gone, patient not persisted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryStore;

    fn patient(id: &str) -> PatientRecord {
        PatientRecord {
            id_number: Some(id.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn every_enqueued_record_is_attempted_once() {
        let store = Arc::new(MemoryStore::new());
        let (queue, worker) = WriteBack::spawn(store.clone());

        queue.enqueue(patient("1012345678"));
        queue.enqueue(patient("2123456789"));
        // Rejected by the store: no id_number. Logged, not fatal.
        queue.enqueue(PatientRecord::default());
        drop(queue);
        worker.await.unwrap();

        assert_eq!(store.patient_count(), 2);
    }

    #[tokio::test]
    async fn enqueue_after_worker_exit_does_not_panic() {
        let store = Arc::new(MemoryStore::new());
        let (queue, worker) = WriteBack::spawn(store.clone());
        worker.abort();
        let _ = worker.await;

        queue.enqueue(patient("1012345678"));
        assert_eq!(store.patient_count(), 0);
    }
}
