mod collective_communicator;
mod data_by_rank;
mod local;
mod sized_communicator;

#[cfg(feature = "mpi")]
mod mpi_world;

pub use collective_communicator::CollectiveCommunicator;
pub use collective_communicator::MaxCommunicator;
pub use data_by_rank::DataByRank;
pub use local::get_local_communicators;
pub use local::LocalCommunicator;
pub use sized_communicator::SizedCommunicator;

#[cfg(feature = "mpi")]
pub use self::mpi_world::MpiWorld;
#[cfg(feature = "mpi")]
pub use self::mpi_world::MPI_UNIVERSE;

/// The communicator the tasks run over. MPI-backed when the `mpi`
/// feature is enabled, channel-backed otherwise.
#[cfg(feature = "mpi")]
pub type Communicator<T> = self::mpi_world::MpiWorld<T>;
#[cfg(not(feature = "mpi"))]
pub type Communicator<T> = self::local::LocalCommunicator<T>;

#[cfg(feature = "mpi")]
pub type Rank = mpi::Rank;
#[cfg(not(feature = "mpi"))]
pub type Rank = i32;

#[cfg(feature = "mpi")]
pub type Count = mpi::Count;
#[cfg(not(feature = "mpi"))]
pub type Count = i32;

/// The coordinator rank. Collective results are delivered here.
pub const MAIN_RANK: Rank = 0;
