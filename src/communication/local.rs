use std::sync::mpsc::channel;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;

use super::collective_communicator::MaxCommunicator;
use super::sized_communicator::SizedCommunicator;
use super::CollectiveCommunicator;
use super::Count;
use super::DataByRank;
use super::Rank;
use super::MAIN_RANK;
use crate::partition::displacements;
use crate::reduce::max_op;

/// Communicator between threads of the same process. Backs the world
/// when MPI is not compiled in.
pub struct LocalCommunicator<T> {
    senders: DataByRank<Sender<Vec<T>>>,
    receivers: DataByRank<Receiver<Vec<T>>>,
    rank: Rank,
    size: usize,
}

impl<T> LocalCommunicator<T> {
    pub fn new(
        rank: Rank,
        size: usize,
        senders: DataByRank<Sender<Vec<T>>>,
        receivers: DataByRank<Receiver<Vec<T>>>,
    ) -> Self {
        Self {
            senders,
            receivers,
            rank,
            size,
        }
    }

    fn send_vec(&mut self, rank: Rank, data: Vec<T>) {
        self.senders.get(&rank).unwrap().send(data).unwrap();
    }

    fn receive_vec(&mut self, rank: Rank) -> Vec<T> {
        self.receivers[rank].recv().unwrap()
    }
}

/// Builds the fully connected channel mesh for a world of `num_ranks`
/// threads. Each rank's communicator is moved onto its thread.
pub fn get_local_communicators<T>(num_ranks: usize) -> DataByRank<LocalCommunicator<T>> {
    let mut senders_and_receivers: Vec<Vec<_>> = (0..num_ranks)
        .map(|_| {
            (0..num_ranks)
                .map(|_| {
                    let (sender, receiver) = channel();
                    (Some(sender), Some(receiver))
                })
                .collect()
        })
        .collect();
    let mut communicators = DataByRank::empty();
    for rank in 0..num_ranks {
        let mut senders = DataByRank::empty();
        let mut receivers = DataByRank::empty();
        for rank2 in 0..num_ranks {
            if rank == rank2 {
                continue;
            }
            senders.insert(
                rank2 as Rank,
                senders_and_receivers[rank][rank2].0.take().unwrap(),
            );
            receivers.insert(
                rank2 as Rank,
                senders_and_receivers[rank2][rank].1.take().unwrap(),
            );
        }
        communicators.insert(
            rank as Rank,
            LocalCommunicator::new(rank as Rank, num_ranks, senders, receivers),
        );
    }
    communicators
}

impl<T> SizedCommunicator for LocalCommunicator<T> {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl<T: Clone> CollectiveCommunicator<T> for LocalCommunicator<T> {
    fn broadcast(&mut self, value: &mut T) {
        if self.is_main() {
            for rank in self.other_ranks() {
                self.send_vec(rank, vec![value.clone()]);
            }
        } else {
            let mut received = self.receive_vec(MAIN_RANK);
            assert_eq!(received.len(), 1);
            *value = received.remove(0);
        }
    }

    fn scatter_varcount(&mut self, elements: &[T], counts: &[Count]) -> Vec<T> {
        if self.is_main() {
            // Copying the slices does not matter in the local communicator
            let displacements = displacements(counts);
            for rank in self.other_ranks() {
                let begin = displacements[rank as usize] as usize;
                let end = begin + counts[rank as usize] as usize;
                self.send_vec(rank, elements[begin..end].to_vec());
            }
            elements[..counts[0] as usize].to_vec()
        } else {
            let received = self.receive_vec(MAIN_RANK);
            assert_eq!(received.len(), counts[self.rank as usize] as usize);
            received
        }
    }
}

impl<T: Clone + PartialOrd> MaxCommunicator<T> for LocalCommunicator<T> {
    fn collective_max(&mut self, send: &T) -> Option<T> {
        if self.is_main() {
            // Folding in ascending rank order keeps the result identical
            // to a sequential scan of the undivided buffer
            let mut result = send.clone();
            for rank in self.other_ranks() {
                let mut received = self.receive_vec(rank);
                assert_eq!(received.len(), 1);
                result = max_op(result, received.remove(0));
            }
            Some(result)
        } else {
            self.send_vec(MAIN_RANK, vec![send.clone()]);
            None
        }
    }
}
