// src/mapping/stagger.rs

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

/// Time-offset dispatch: item `i` is started `i * step` after the call.
///
/// A single scheduler thread walks `items` in order and hands each one to its
/// own worker thread once its offset has passed, so slow calls never hold up
/// later ones. Results are sent on `tx` as they finish, which means they can
/// arrive in any order. Nothing here waits for an acknowledgment, retries, or
/// can be cancelled once started. The channel closes once every worker (and
/// every other sender clone) is done.
///
/// An item whose worker can't be spawned is logged and never reported.
pub fn dispatch_staggered<I, T, F>(items: Vec<I>, step: Duration, tx: Sender<T>, work: F)
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> T + Send + Sync + 'static,
{
    let work = Arc::new(work);

    let scheduler = thread::Builder::new()
        .name("stagger".into())
        .spawn(move || {
            let start = Instant::now();

            for (index, item) in items.into_iter().enumerate() {
                let offset = step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
                let elapsed = start.elapsed();
                if offset > elapsed {
                    thread::sleep(offset - elapsed);
                }

                let tx = tx.clone();
                let work = Arc::clone(&work);
                let spawned = thread::Builder::new().spawn(move || {
                    // Receiver gone means nobody cares about this result any more.
                    let _ = tx.send(work(item));
                });
                if let Err(e) = spawned {
                    warn!(index, "Could not start staggered worker: {e}");
                }
            }
        });

    if let Err(e) = scheduler {
        warn!("Could not start stagger scheduler: {e}");
    }
}
