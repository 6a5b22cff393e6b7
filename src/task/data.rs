/// A borrowed, typed input buffer of a task.
pub enum InputBuffer<'a, T> {
    /// Matrix shape as `[rows, cols]`.
    Dimensions(&'a [i32]),
    /// Matrix elements in row-major order.
    Elements(&'a [T]),
}

/// The buffers a task reads from and writes to. Inputs and outputs are
/// indexed in the order they were added.
pub struct TaskData<'a, T> {
    inputs: Vec<InputBuffer<'a, T>>,
    outputs: Vec<&'a mut [T]>,
}

impl<'a, T> TaskData<'a, T> {
    pub fn new() -> Self {
        Self {
            inputs: vec![],
            outputs: vec![],
        }
    }

    pub fn push_input(&mut self, input: InputBuffer<'a, T>) {
        self.inputs.push(input);
    }

    pub fn push_output(&mut self, output: &'a mut [T]) {
        self.outputs.push(output);
    }

    pub fn has_inputs(&self) -> bool {
        !self.inputs.is_empty()
    }

    pub fn has_outputs(&self) -> bool {
        !self.outputs.is_empty()
    }

    /// The input at `index` if it is a dimensions buffer.
    pub fn dimensions(&self, index: usize) -> Option<&'a [i32]> {
        match self.inputs.get(index) {
            Some(InputBuffer::Dimensions(dimensions)) => Some(dimensions),
            _ => None,
        }
    }

    /// The input at `index` if it is an elements buffer.
    pub fn elements(&self, index: usize) -> Option<&'a [T]> {
        match self.inputs.get(index) {
            Some(InputBuffer::Elements(elements)) => Some(elements),
            _ => None,
        }
    }

    /// First slot of the output buffer at `index`.
    pub fn output_mut(&mut self, index: usize) -> Option<&mut T> {
        self.outputs
            .get_mut(index)
            .and_then(|buffer| buffer.first_mut())
    }
}

impl<T> Default for TaskData<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
