use std::sync::Arc;

use tokio::sync::RwLock;

mod expenses;
pub use expenses::*;

/// Process-lifetime expense storage. Cloning shares the same underlying list.
#[derive(Clone, Default)]
pub struct Data {
    expenses: Arc<RwLock<Vec<Expense>>>,
}

impl Data {
    pub fn new() -> Self {
        return Self::default();
    }
}
