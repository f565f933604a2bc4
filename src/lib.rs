//! Scrapes financial report tables from Yahoo! Finance quote pages and
//! reshapes them into canonical tables for text, JSON or Excel output.

pub mod error;
pub mod fetch;
pub mod output;
pub mod process;
pub mod report;
