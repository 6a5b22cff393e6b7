use super::Rank;
use super::MAIN_RANK;

pub trait SizedCommunicator {
    fn size(&self) -> usize;
    fn rank(&self) -> Rank;

    fn is_main(&self) -> bool {
        self.rank() == MAIN_RANK
    }

    fn other_ranks(&self) -> Vec<Rank> {
        (0i32..self.size() as i32)
            .filter(|rank| *rank != self.rank())
            .collect()
    }
}
