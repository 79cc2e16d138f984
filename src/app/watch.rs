//! Background content reloads so file I/O never blocks the UI thread.

use tokio::sync::mpsc;

use crate::core::{
    error::SourceError,
    source::{Content, ContentSource},
};

/// Result of one reload, tagged with the generation that requested it.
pub struct ContentUpdate {
    pub generation: u64,
    pub result: Result<Content, SourceError>,
}

pub fn spawn_reload(
    tx: mpsc::UnboundedSender<ContentUpdate>,
    generation: u64,
    source: ContentSource,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let t0 = std::time::Instant::now();
        let result = source.load();
        tracing::debug!(
            "reload: {:.2?} path={} ok={}",
            t0.elapsed(),
            source.path().display(),
            result.is_ok()
        );
        if tx.send(ContentUpdate { generation, result }).is_err() {
            tracing::debug!(generation, "reload: receiver gone, update dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_reports_its_generation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_reload(tx, 7, ContentSource::File(path));
        let update = rx.blocking_recv().unwrap();

        assert_eq!(update.generation, 7);
        assert_eq!(update.result.unwrap().lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn closed_receiver_does_not_panic_the_worker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "x").unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        spawn_reload(tx, 1, ContentSource::File(path)).join().unwrap();
    }
}
