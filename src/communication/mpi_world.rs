use std::marker::PhantomData;
use std::mem;
use std::mem::MaybeUninit;
use std::sync::Arc;
use std::sync::Mutex;

use lazy_static::lazy_static;
use mpi::collective::SystemOperation;
use mpi::datatype::Partition;
use mpi::environment::Universe;
use mpi::topology::SystemCommunicator;
use mpi::traits::Communicator;
use mpi::traits::Equivalence;
use mpi::traits::Root;

use super::collective_communicator::MaxCommunicator;
use super::CollectiveCommunicator;
use super::Count;
use super::Rank;
use super::SizedCommunicator;
use super::MAIN_RANK;
use crate::partition::displacements;

/// A wrapper around universe which contains the universe in an
/// Option. This allows calling .take at program completion so that
/// the Universe is dropped which will call MPI_FINALIZE. This is
/// necessary because anything in a lazy_static will never be dropped.
pub struct StaticUniverse(Arc<Mutex<Option<Universe>>>);

impl StaticUniverse {
    pub fn world(&self) -> SystemCommunicator {
        self.0.lock().unwrap().as_ref().unwrap().world()
    }

    pub fn drop(&self) {
        let _ = self.0.lock().unwrap().take();
    }
}

lazy_static! {
    pub static ref MPI_UNIVERSE: StaticUniverse = {
        let universe = mpi::initialize().unwrap();
        StaticUniverse(Arc::new(Mutex::new(Some(universe))))
    };
}

#[derive(Clone)]
pub struct MpiWorld<T> {
    world: SystemCommunicator,
    _marker: PhantomData<T>,
}

impl<T> MpiWorld<T> {
    pub fn new() -> Self {
        let world = MPI_UNIVERSE.world();
        Self {
            world,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for MpiWorld<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SizedCommunicator for MpiWorld<T> {
    fn rank(&self) -> Rank {
        self.world.rank()
    }

    fn size(&self) -> usize {
        self.world.size() as usize
    }
}

unsafe fn get_buffer<T>(num_elements: usize) -> Vec<T> {
    let mut buffer: Vec<MaybeUninit<T>> = Vec::with_capacity(num_elements);
    unsafe {
        buffer.set_len(num_elements);
        mem::transmute(buffer)
    }
}

impl<T: Equivalence> CollectiveCommunicator<T> for MpiWorld<T> {
    fn broadcast(&mut self, value: &mut T) {
        self.world.process_at_rank(MAIN_RANK).broadcast_into(value);
    }

    fn scatter_varcount(&mut self, elements: &[T], counts: &[Count]) -> Vec<T> {
        let rank = self.rank();
        let mut local_buffer = unsafe { get_buffer(counts[rank as usize] as usize) };
        let root = self.world.process_at_rank(MAIN_RANK);
        if rank == MAIN_RANK {
            let displacements = displacements(counts);
            let partition = Partition::new(elements, counts, &displacements[..]);
            root.scatter_varcount_into_root(&partition, &mut local_buffer[..]);
        } else {
            root.scatter_varcount_into(&mut local_buffer[..]);
        }
        local_buffer
    }
}

impl<T: Equivalence + Clone> MaxCommunicator<T> for MpiWorld<T> {
    fn collective_max(&mut self, send: &T) -> Option<T> {
        let root = self.world.process_at_rank(MAIN_RANK);
        if self.world.rank() == MAIN_RANK {
            let mut result = send.clone();
            root.reduce_into_root(send, &mut result, SystemOperation::max());
            Some(result)
        } else {
            root.reduce_into(send, SystemOperation::max());
            None
        }
    }
}
