use crate::ledger::Customer;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use strum::{Display, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub name: String,
    pub favorite_snack: String,
    pub total_snacks: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl From<&Customer> for CustomerSummary {
    /// Picks the snack with the strictly greatest count. The first snack to
    /// reach the maximum wins, so ties go to the earliest inserted one.
    fn from(customer: &Customer) -> Self {
        let mut favorite_snack = "";
        let mut total_snacks = 0;
        for (snack, &count) in &customer.snacks {
            if count > total_snacks {
                total_snacks = count;
                favorite_snack = snack.as_str();
            }
        }

        Self {
            name: customer.name.clone(),
            favorite_snack: favorite_snack.to_string(),
            total_snacks,
        }
    }
}

pub fn reduce<'a, I>(customers: I) -> Vec<CustomerSummary>
where
    I: IntoIterator<Item = &'a Customer>,
{
    customers.into_iter().map(CustomerSummary::from).collect()
}

impl OutputFormat {
    pub fn render(&self, summaries: &[CustomerSummary]) -> Result<String> {
        let json = match self {
            OutputFormat::Pretty => {
                let mut buf = Vec::new();
                let mut ser =
                    Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"   "));
                summaries.serialize(&mut ser)?;
                String::from_utf8(buf)?
            }
            OutputFormat::Compact => serde_json::to_string(summaries)?,
        };
        Ok(json)
    }
}
