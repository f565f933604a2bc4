//! The four report types a quote page can be scraped for.

use std::fmt;

/// Selects both the page to fetch and the reshape path: the three financial
/// statements share the row/transpose pipeline, the summary page has its own
/// flat key/value one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    IncomeStatement,
    BalanceSheet,
    CashFlow,
    Summary,
}

impl ReportType {
    /// Display label, also used as the Excel worksheet name.
    pub fn label(self) -> &'static str {
        match self {
            Self::IncomeStatement => "Income Statement",
            Self::BalanceSheet => "Balance Sheet",
            Self::CashFlow => "Cash Flow",
            Self::Summary => "Summary",
        }
    }

    /// Quote page URL for `symbol`.
    pub fn page_url(self, symbol: &str) -> String {
        match self {
            Self::IncomeStatement => {
                format!("https://finance.yahoo.com/quote/{symbol}/financials?p={symbol}")
            }
            Self::BalanceSheet => {
                format!("https://finance.yahoo.com/quote/{symbol}/balance-sheet?p={symbol}")
            }
            Self::CashFlow => {
                format!("https://finance.yahoo.com/quote/{symbol}/cash-flow?p={symbol}")
            }
            Self::Summary => format!("https://finance.yahoo.com/quote/{symbol}?p={symbol}"),
        }
    }

    pub fn is_summary(self) -> bool {
        self == Self::Summary
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_urls_embed_the_symbol_twice() {
        assert_eq!(
            ReportType::IncomeStatement.page_url("AAPL"),
            "https://finance.yahoo.com/quote/AAPL/financials?p=AAPL"
        );
        assert_eq!(
            ReportType::Summary.page_url("MSFT"),
            "https://finance.yahoo.com/quote/MSFT?p=MSFT"
        );
    }
}
