use std::sync::{Barrier, Mutex};

/// Spawns one OS thread per worker rank, runs `worker` on each, and returns
/// the results in rank order. Workers share no search state; they
/// coordinate exclusively through [`Exchange`] collectives.
pub fn run_worker_team<R: Send>(workers: usize, worker: impl Fn(usize) -> R + Sync) -> Vec<R> {
    assert!(workers >= 1);

    std::thread::scope(|scope| {
        let worker = &worker;
        let handles: Vec<_> = (0..workers)
            .map(|rank| scope.spawn(move || worker(rank)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .collect()
    })
}

/// Single-shot collective among a fixed team of workers: every rank
/// deposits at most one value, a barrier closes the exchange, then all
/// ranks read. Construct one instance per collective operation.
pub struct Exchange<T> {
    slots: Mutex<Vec<Option<T>>>,
    barrier: Barrier,
}

impl<T: Clone> Exchange<T> {
    pub fn new(workers: usize) -> Self {
        Self {
            slots: Mutex::new(vec![None; workers]),
            barrier: Barrier::new(workers),
        }
    }

    /// Every rank contributes a value; all ranks observe the fold over the
    /// team in rank order.
    pub fn all_reduce(&self, rank: usize, value: T, fold: impl Fn(T, T) -> T) -> T {
        {
            let mut slots = self.slots.lock().unwrap();
            debug_assert!(slots[rank].is_none(), "exchange instances are single-shot");
            slots[rank] = Some(value);
        }

        self.barrier.wait();

        let slots = self.slots.lock().unwrap();
        slots
            .iter()
            .map(|slot| slot.clone().unwrap())
            .reduce(fold)
            .unwrap()
    }

    /// The `root` rank passes `Some(value)`; every rank receives it.
    pub fn broadcast(&self, rank: usize, root: usize, value: Option<T>) -> T {
        debug_assert_eq!(rank == root, value.is_some());

        if let Some(value) = value {
            self.slots.lock().unwrap()[root] = Some(value);
        }

        self.barrier.wait();

        self.slots.lock().unwrap()[root].clone().unwrap()
    }
}
