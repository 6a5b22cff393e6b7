use log::info;
use log::trace;

use super::declared_shape;
use super::MatrixElement;
use crate::communication::CollectiveCommunicator;
use crate::communication::Communicator;
use crate::communication::MaxCommunicator;
use crate::communication::SizedCommunicator;
use crate::partition::Partition;
use crate::reduce;
use crate::task::Task;
use crate::task::TaskData;

/// Maximum over a matrix, computed by all ranks of a world together.
///
/// The coordinator rank holds the input matrix and receives the
/// result; every other rank takes part with empty task data. The run
/// stage issues collective operations, so all ranks have to move
/// through the stages in lockstep.
pub struct DistributedMax<'a, T> {
    data: TaskData<'a, T>,
    shape_comm: Communicator<i32>,
    element_comm: Communicator<T>,
    matrix: Vec<T>,
    result: Option<T>,
}

impl<'a, T> DistributedMax<'a, T> {
    pub fn new(
        data: TaskData<'a, T>,
        shape_comm: Communicator<i32>,
        element_comm: Communicator<T>,
    ) -> Self {
        Self {
            data,
            shape_comm,
            element_comm,
            matrix: vec![],
            result: None,
        }
    }
}

impl<T: MatrixElement> Task for DistributedMax<'_, T>
where
    Communicator<T>: CollectiveCommunicator<T> + MaxCommunicator<T>,
{
    fn validate(&mut self) -> bool {
        if !self.element_comm.is_main() {
            return true;
        }
        if !self.data.has_inputs() || !self.data.has_outputs() {
            return false;
        }
        matches!(declared_shape(&self.data), Some((rows, cols)) if rows > 0 && cols > 0)
    }

    fn pre_process(&mut self) -> bool {
        if !self.element_comm.is_main() {
            return true;
        }
        let (rows, cols) = match declared_shape(&self.data) {
            Some(shape) => shape,
            None => return false,
        };
        if rows <= 0 || cols <= 0 {
            return false;
        }
        let num_elements = rows as usize * cols as usize;
        match self.data.elements(1) {
            Some(elements) if elements.len() >= num_elements => {
                self.matrix.extend_from_slice(&elements[..num_elements]);
                true
            }
            _ => false,
        }
    }

    fn run(&mut self) -> bool {
        let (mut rows, mut cols) = if self.element_comm.is_main() {
            declared_shape(&self.data).unwrap_or((0, 0))
        } else {
            (0, 0)
        };
        self.shape_comm.broadcast(&mut rows);
        self.shape_comm.broadcast(&mut cols);
        let num_elements = if rows > 0 && cols > 0 {
            rows as usize * cols as usize
        } else {
            0
        };
        let partition = Partition::new(num_elements, self.element_comm.size());
        if self.element_comm.is_main() {
            info!(
                "distributing {} matrix elements over {} ranks",
                num_elements,
                self.element_comm.size()
            );
        }
        let local = self
            .element_comm
            .scatter_varcount(&self.matrix, partition.counts());
        trace!(
            "rank {} reduces {} local elements",
            self.element_comm.rank(),
            local.len()
        );
        let local_max = reduce::max_or_zero(&local);
        self.result = self.element_comm.collective_max(&local_max);
        true
    }

    fn post_process(&mut self) -> bool {
        match self.result {
            Some(result) => match self.data.output_mut(0) {
                Some(output) => {
                    *output = result;
                    true
                }
                None => false,
            },
            None => true,
        }
    }
}

/// Computes the distributed maximum on a world of threads. Spawns one
/// thread per rank, runs the coordinator rank on the calling thread
/// and returns its result, `None` if a coordinator stage failed.
///
/// The inputs must pass the task's validation. Invalid inputs leave
/// the worker ranks stuck in a collective and panic the world.
#[cfg(not(feature = "mpi"))]
pub fn run_local_distributed_max<T: MatrixElement>(
    num_ranks: usize,
    dimensions: &[i32],
    elements: &[T],
) -> Option<T> {
    use std::thread;

    use crate::communication::get_local_communicators;
    use crate::communication::Rank;
    use crate::communication::MAIN_RANK;
    use crate::task::InputBuffer;
    use crate::task::TaskPipeline;

    let mut shape_comms = get_local_communicators::<i32>(num_ranks);
    let mut element_comms = get_local_communicators::<T>(num_ranks);
    let mut handles = vec![];
    for rank in 1..num_ranks as Rank {
        let shape_comm = shape_comms.remove(&rank).unwrap();
        let element_comm = element_comms.remove(&rank).unwrap();
        handles.push(thread::spawn(move || {
            let task = DistributedMax::new(TaskData::new(), shape_comm, element_comm);
            let mut pipeline = TaskPipeline::new(task);
            pipeline.execute()
        }));
    }
    let mut result = [T::zero()];
    let mut data = TaskData::new();
    data.push_input(InputBuffer::Dimensions(dimensions));
    data.push_input(InputBuffer::Elements(elements));
    data.push_output(&mut result);
    let succeeded = {
        let task = DistributedMax::new(
            data,
            shape_comms.remove(&MAIN_RANK).unwrap(),
            element_comms.remove(&MAIN_RANK).unwrap(),
        );
        let mut pipeline = TaskPipeline::new(task);
        pipeline.execute()
    };
    for handle in handles {
        assert!(handle.join().unwrap());
    }
    succeeded.then_some(result[0])
}

#[cfg(test)]
#[cfg(not(feature = "mpi"))]
#[generic_tests::define]
mod tests {
    use num::NumCast;
    use rand::rngs::StdRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::run_local_distributed_max;
    use crate::max::MatrixElement;
    use crate::max::SequentialMax;
    use crate::reduce;
    use crate::task::InputBuffer;
    use crate::task::TaskData;
    use crate::task::TaskPipeline;

    fn element<T: NumCast>(value: i32) -> T {
        NumCast::from(value).unwrap()
    }

    #[test]
    fn finds_the_known_maximum<T: MatrixElement + NumCast + std::fmt::Debug>() {
        let elements: Vec<T> = [1, 7, 3, 9, 2, 5].iter().map(|v| element(*v)).collect();
        assert_eq!(
            run_local_distributed_max(2, &[2, 3], &elements),
            Some(element(9))
        );
    }

    #[test]
    fn more_ranks_than_elements<T: MatrixElement + NumCast + std::fmt::Debug>() {
        let elements = [element::<T>(42)];
        assert_eq!(
            run_local_distributed_max(4, &[1, 1], &elements),
            Some(element(42))
        );
    }

    #[test]
    fn agrees_with_the_sequential_task<T: MatrixElement + NumCast + std::fmt::Debug>() {
        let mut rng = StdRng::seed_from_u64(1337);
        for num_ranks in [1, 2, 3, 5] {
            for (rows, cols) in [(1, 1), (3, 4), (7, 5), (16, 16)] {
                let elements: Vec<T> = (0..rows * cols)
                    .map(|_| element(rng.gen_range(0..10_000)))
                    .collect();
                let dimensions = [rows, cols];
                let distributed = run_local_distributed_max(num_ranks, &dimensions, &elements);

                let mut expected = [T::zero()];
                let mut data = TaskData::new();
                data.push_input(InputBuffer::Dimensions(&dimensions));
                data.push_input(InputBuffer::Elements(&elements));
                data.push_output(&mut expected);
                let succeeded = {
                    let mut pipeline = TaskPipeline::new(SequentialMax::new(data));
                    pipeline.execute()
                };
                assert!(succeeded);
                assert_eq!(distributed, Some(expected[0]));
                assert_eq!(distributed, reduce::max_element(&elements));
            }
        }
    }

    #[instantiate_tests(<i32>)]
    mod i32 {}

    #[instantiate_tests(<i64>)]
    mod i64 {}

    #[instantiate_tests(<u32>)]
    mod u32 {}

    #[instantiate_tests(<f64>)]
    mod f64 {}
}
