use serde::Serialize;

use crate::utils::serialize_js_number;

use super::Data;

impl Data {
    pub async fn query_expenses(&self) -> Vec<Expense> {
        let expenses = self.expenses.read().await;

        return expenses.clone();
    }

    pub async fn count_expenses(&self) -> usize {
        return self.expenses.read().await.len();
    }

    /// Appends the expense and returns it with its assigned id. The id is
    /// derived from the list length while the write guard is held, so
    /// concurrent inserts never observe the same length.
    pub async fn insert_expense(&self, expense: InsertExpense) -> Expense {
        let mut expenses = self.expenses.write().await;

        let expense = Expense {
            id: expenses.len() as u64 + 1,
            amount: expense.amount,
            description: expense.description,
            category: expense.category,
            date: expense.date,
        };
        expenses.push(expense.clone());

        tracing::debug!(id = expense.id, total = expenses.len(), "inserted expense");

        return expense;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub id: u64,
    #[serde(serialize_with = "serialize_js_number")]
    pub amount: f64,
    pub description: String,
    pub category: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertExpense {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub date: String,
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::{Data, InsertExpense};

    fn expense(description: &str) -> InsertExpense {
        InsertExpense {
            amount: 12.5,
            description: description.to_owned(),
            category: "food".to_owned(),
            date: "2025-01-01".to_owned(),
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let data = Data::new();

        assert!(data.query_expenses().await.is_empty());
        assert_eq!(data.count_expenses().await, 0);
    }

    #[tokio::test]
    async fn assigns_sequential_ids_in_insertion_order() {
        let data = Data::new();

        let first = data.insert_expense(expense("coffee")).await;
        let second = data.insert_expense(expense("lunch")).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let all = data.query_expenses().await;
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn clones_share_the_same_list() {
        let data = Data::new();
        let other = data.clone();

        other.insert_expense(expense("coffee")).await;

        assert_eq!(data.count_expenses().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_get_distinct_ids() {
        let data = Data::new();

        let handles = (0..64)
            .map(|i| {
                let data = data.clone();
                tokio::spawn(async move { data.insert_expense(expense(&format!("e{i}"))).await })
            })
            .collect::<Vec<_>>();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.expect("join").id);
        }

        assert_eq!(ids.len(), 64);
        assert_eq!(ids, (1..=64).collect::<HashSet<u64>>());

        let stored = data.query_expenses().await;
        let stored_ids = stored.iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(stored_ids, (1..=64).collect::<Vec<u64>>());
    }

    #[test]
    fn serializes_in_field_order() {
        let expense = super::Expense {
            id: 1,
            amount: 12.0,
            description: "coffee".to_owned(),
            category: "food".to_owned(),
            date: "2025-01-01".to_owned(),
        };

        assert_eq!(
            serde_json::to_string(&expense).expect("json"),
            r#"{"id":1,"amount":12,"description":"coffee","category":"food","date":"2025-01-01"}"#
        );
    }
}
