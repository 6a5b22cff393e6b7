pub mod communication;
pub mod max;
pub mod partition;
pub mod reduce;
pub mod task;

pub mod prelude {
    pub use crate::communication::Communicator;
    pub use crate::communication::MAIN_RANK;
    pub use crate::communication::SizedCommunicator;
    pub use crate::max::DistributedMax;
    pub use crate::max::MatrixElement;
    pub use crate::max::SequentialMax;
    pub use crate::partition::Partition;
    pub use crate::task::InputBuffer;
    pub use crate::task::Task;
    pub use crate::task::TaskData;
    pub use crate::task::TaskPipeline;
}
