use chrono::NaiveDate;
use core_types::{FundId, Window};
use metrics::MetricKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The columnar result for one (metric, window) pair: a shared date axis with
/// one column per fund.
///
/// A `None` cell means "no value here" — either the fund had no full trailing
/// window at that date, or the statistic was undefined on the window's data.
/// Downstream ranking treats both as "no rank available". The layout
/// serializes directly to the date-keyed, fund-column table the presentation
/// layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTable {
    pub metric: MetricKind,
    pub window: Window,
    pub dates: Vec<NaiveDate>,
    pub columns: BTreeMap<FundId, Vec<Option<f64>>>,
}

impl MetricTable {
    /// The cell for one fund at one evaluation date.
    pub fn value(&self, fund: &FundId, date: NaiveDate) -> Option<f64> {
        let index = self.dates.iter().position(|d| *d == date)?;
        self.columns.get(fund)?.get(index).copied().flatten()
    }

    pub fn column(&self, fund: &FundId) -> Option<&[Option<f64>]> {
        self.columns.get(fund).map(Vec::as_slice)
    }

    /// Count of defined cells, useful for batch summaries.
    pub fn defined_cells(&self) -> usize {
        self.columns
            .values()
            .map(|column| column.iter().filter(|cell| cell.is_some()).count())
            .sum()
    }
}

/// All tables produced by one evaluation batch, addressable by
/// (metric, window) and then by fund column and date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationOutput {
    tables: BTreeMap<(MetricKind, Window), MetricTable>,
}

impl EvaluationOutput {
    pub(crate) fn from_tables(
        tables: impl IntoIterator<Item = MetricTable>,
    ) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|table| ((table.metric, table.window), table))
                .collect(),
        }
    }

    pub fn table(&self, metric: MetricKind, window: Window) -> Option<&MetricTable> {
        self.tables.get(&(metric, window))
    }

    pub fn tables(&self) -> impl Iterator<Item = &MetricTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 28).unwrap()
    }

    fn sample_table() -> MetricTable {
        MetricTable {
            metric: MetricKind::Volatility,
            window: Window::new(12).unwrap(),
            dates: vec![date(2024, 1), date(2024, 2)],
            columns: BTreeMap::from([
                (FundId::from("A"), vec![Some(0.1), None]),
                (FundId::from("B"), vec![None, Some(0.2)]),
            ]),
        }
    }

    #[test]
    fn value_resolves_by_fund_and_date() {
        let table = sample_table();
        assert_eq!(table.value(&FundId::from("A"), date(2024, 1)), Some(0.1));
        assert_eq!(table.value(&FundId::from("A"), date(2024, 2)), None);
        assert_eq!(table.value(&FundId::from("C"), date(2024, 1)), None);
        assert_eq!(table.defined_cells(), 2);
    }

    #[test]
    fn output_is_addressable_by_metric_and_window() {
        let table = sample_table();
        let output = EvaluationOutput::from_tables([table.clone()]);
        assert_eq!(
            output.table(MetricKind::Volatility, Window::new(12).unwrap()),
            Some(&table)
        );
        assert!(output.table(MetricKind::Beta, Window::new(12).unwrap()).is_none());
    }

    #[test]
    fn table_serializes_with_fund_keyed_columns() {
        let table = sample_table();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["metric"], "volatility");
        assert_eq!(json["window"], 12);
        assert_eq!(json["columns"]["A"][0], 0.1);
        assert!(json["columns"]["A"][1].is_null());
    }
}
