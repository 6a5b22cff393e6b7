mod distributed;
mod sequential;

pub use distributed::DistributedMax;
#[cfg(not(feature = "mpi"))]
pub use distributed::run_local_distributed_max;
pub use sequential::SequentialMax;

use num::Zero;

use crate::task::TaskData;

/// Element types the maximum reductions operate on.
pub trait MatrixElement: Copy + PartialOrd + Zero + Send + 'static {}

impl<T> MatrixElement for T where T: Copy + PartialOrd + Zero + Send + 'static {}

/// Shape declared in the dimensions input, as `(rows, cols)`.
fn declared_shape<T>(data: &TaskData<'_, T>) -> Option<(i32, i32)> {
    let dimensions = data.dimensions(0)?;
    let rows = *dimensions.first()?;
    let cols = *dimensions.get(1)?;
    Some((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::declared_shape;
    use crate::task::InputBuffer;
    use crate::task::TaskData;

    #[test]
    fn shape_comes_from_the_first_input() {
        let dimensions = [4, 6];
        let mut data: TaskData<i32> = TaskData::new();
        assert_eq!(declared_shape(&data), None);
        data.push_input(InputBuffer::Dimensions(&dimensions));
        assert_eq!(declared_shape(&data), Some((4, 6)));
    }

    #[test]
    fn truncated_or_mistyped_shape_buffers_are_rejected() {
        let mut data: TaskData<i32> = TaskData::new();
        data.push_input(InputBuffer::Dimensions(&[3]));
        assert_eq!(declared_shape(&data), None);

        let elements = [1, 2];
        let mut data = TaskData::new();
        data.push_input(InputBuffer::Elements(&elements));
        assert_eq!(declared_shape(&data), None);
    }
}
