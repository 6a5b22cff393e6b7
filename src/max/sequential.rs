use super::declared_shape;
use super::MatrixElement;
use crate::reduce;
use crate::task::Task;
use crate::task::TaskData;

/// Single-rank maximum over a matrix. Serves as the reference the
/// distributed reduction is checked against.
pub struct SequentialMax<'a, T> {
    data: TaskData<'a, T>,
    matrix: Vec<T>,
}

impl<'a, T> SequentialMax<'a, T> {
    pub fn new(data: TaskData<'a, T>) -> Self {
        Self {
            data,
            matrix: vec![],
        }
    }
}

impl<T: MatrixElement> Task for SequentialMax<'_, T> {
    fn validate(&mut self) -> bool {
        self.data.has_inputs() && self.data.has_outputs()
    }

    fn pre_process(&mut self) -> bool {
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
        // the matrix is never empty when pre_process succeeded
        let result = match reduce::max_element(&self.matrix) {
            Some(result) => result,
            None => return false,
        };
        match self.data.output_mut(0) {
            Some(output) => {
                *output = result;
                true
            }
            None => false,
        }
    }

    fn post_process(&mut self) -> bool {
        true
    }
}
