use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use log::debug;

/// One parsed observation of a customer eating some amount of a snack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub customer: String,
    pub snack: String,
    pub count: u64,
}

/// A customer and the cumulative count of every snack they have eaten,
/// in the order the snacks were first seen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub snacks: IndexMap<String, u64>,
}

/// Insertion-ordered collection of customers keyed by name.
#[derive(Debug, Default)]
pub struct SnackLedger {
    customers: IndexMap<String, Customer>,
}

impl Row {
    pub fn new(customer: impl Into<String>, snack: impl Into<String>, count: u64) -> Self {
        Self {
            customer: customer.into(),
            snack: snack.into(),
            count,
        }
    }

    /// Builds a row from raw cell text. The count must be a non-negative
    /// integer once surrounding whitespace is trimmed.
    pub fn from_cells(customer: &str, snack: &str, count: &str) -> Result<Self> {
        let count = count
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Parsing snack amount {:?} for {:?} failed", count, customer))?;

        Ok(Self::new(customer.trim(), snack.trim(), count))
    }
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snacks: IndexMap::new(),
        }
    }
}

impl SnackLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, row: Row) -> Result<()> {
        debug!("{} ate {} x {}", row.customer, row.count, row.snack);

        let customer = self
            .customers
            .entry(row.customer)
            .or_insert_with_key(|name| Customer::new(name.as_str()));

        let total = customer.snacks.entry(row.snack).or_insert(0);
        *total = total.checked_add(row.count).ok_or_else(|| {
            anyhow!(
                "Snack amount for {:?} overflowed while adding {}",
                customer.name,
                row.count
            )
        })?;

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Customer> {
        self.customers.get(name)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

/// Folds every row into a fresh ledger, stopping at the first failure.
pub fn accumulate<I>(rows: I) -> Result<SnackLedger>
where
    I: IntoIterator<Item = Row>,
{
    let mut ledger = SnackLedger::new();
    for row in rows {
        ledger.record(row)?;
    }
    Ok(ledger)
}
