mod data;

pub use data::InputBuffer;
pub use data::TaskData;

/// The stages of a task, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStage {
    Validated,
    PreProcessed,
    Ran,
    PostProcessed,
}

/// A computation with a fixed four-stage lifecycle. Stages report
/// success as booleans; [`TaskPipeline`] checks that they are called
/// in order.
pub trait Task {
    /// Checks that the task's buffers are usable. Only meaningful on
    /// the coordinator rank of a distributed task.
    fn validate(&mut self) -> bool;
    /// Moves input data into the task's internal state.
    fn pre_process(&mut self) -> bool;
    /// Performs the computation.
    fn run(&mut self) -> bool;
    /// Moves results into the output buffers.
    fn post_process(&mut self) -> bool;
}

/// Drives a [`Task`] through its lifecycle.
///
/// Each stage method must be called exactly once, in order. Calling
/// them out of order is a programming error and panics. A stage
/// returning `false` does not poison the pipeline; the caller decides
/// whether to go on.
pub struct TaskPipeline<T> {
    task: T,
    completed: Option<TaskStage>,
}

impl<T: Task> TaskPipeline<T> {
    pub fn new(task: T) -> Self {
        Self {
            task,
            completed: None,
        }
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    /// Runs all four stages in order, stopping at the first failure.
    pub fn execute(&mut self) -> bool {
        self.validate() && self.pre_process() && self.run() && self.post_process()
    }

    pub fn validate(&mut self) -> bool {
        self.enter(TaskStage::Validated);
        self.task.validate()
    }

    pub fn pre_process(&mut self) -> bool {
        self.enter(TaskStage::PreProcessed);
        self.task.pre_process()
    }

    pub fn run(&mut self) -> bool {
        self.enter(TaskStage::Ran);
        self.task.run()
    }

    pub fn post_process(&mut self) -> bool {
        self.enter(TaskStage::PostProcessed);
        self.task.post_process()
    }

    fn enter(&mut self, stage: TaskStage) {
        let expected = match stage {
            TaskStage::Validated => None,
            TaskStage::PreProcessed => Some(TaskStage::Validated),
            TaskStage::Ran => Some(TaskStage::PreProcessed),
            TaskStage::PostProcessed => Some(TaskStage::Ran),
        };
        assert_eq!(
            self.completed, expected,
            "task stage {:?} entered out of order",
            stage
        );
        self.completed = Some(stage);
    }
}
