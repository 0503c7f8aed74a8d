//! Recognized table columns and the raw row shape.
//!
//! A [`RawRow`] is what arrives at the store or API boundary before any
//! domain coercion: a cell string per recognized column, with absent
//! columns simply missing from the map.

use std::collections::BTreeMap;

use crate::client::ProcessStep;

/// Header of the derived progress column.
pub const PROGRESS_HEADER: &str = "نسبة التقدم";

/// A recognized column of the client table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    ClientName,
    ClientType,
    Step(ProcessStep),
    ServiceStatus,
    FirstInvoice,
    SecondInvoice,
    Notes,
    /// Derived on write, ignored on read.
    Progress,
}

/// Columns that an imported table must carry.
pub const MANDATORY_COLUMNS: [Column; 3] =
    [Column::ClientName, Column::ClientType, Column::ServiceStatus];

/// A row of raw cell strings keyed by column.
pub type RawRow = BTreeMap<Column, String>;

impl Column {
    /// Every stored column in file order, progress last.
    pub const ALL: [Column; 15] = [
        Self::ClientName,
        Self::ClientType,
        Self::Step(ProcessStep::TechnicalProposal),
        Self::Step(ProcessStep::FinancialProposal),
        Self::Step(ProcessStep::CoiForm),
        Self::Step(ProcessStep::CaForm),
        Self::Step(ProcessStep::WordContract),
        Self::Step(ProcessStep::ElForm),
        Self::Step(ProcessStep::SignedPdfContract),
        Self::Step(ProcessStep::SentToClient),
        Self::ServiceStatus,
        Self::FirstInvoice,
        Self::SecondInvoice,
        Self::Notes,
        Self::Progress,
    ];

    /// Header text in the table file.
    pub fn header(&self) -> &'static str {
        match self {
            Self::ClientName => "اسم العميل",
            Self::ClientType => "نوع العميل",
            Self::Step(step) => step.header(),
            Self::ServiceStatus => "حالة الخدمة",
            Self::FirstInvoice => "فاتورة أولى (50%)",
            Self::SecondInvoice => "فاتورة ثانية (50%)",
            Self::Notes => "ملاحظات",
            Self::Progress => PROGRESS_HEADER,
        }
    }

    /// Field key in the JSON API.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ClientName => "client_name",
            Self::ClientType => "client_type",
            Self::Step(step) => step.key(),
            Self::ServiceStatus => "service_status",
            Self::FirstInvoice => "invoice_1",
            Self::SecondInvoice => "invoice_2",
            Self::Notes => "notes",
            Self::Progress => "progress_percent",
        }
    }

    /// Resolve a header or API key to a column.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.header() == name || c.key() == name)
    }

    /// Whether a cell in this column is coerced into an enumerated domain.
    pub fn is_enumerated(&self) -> bool {
        !matches!(self, Self::ClientName | Self::Notes | Self::Progress)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Build a raw row from `(header or key, value)` pairs, dropping
/// unrecognized names.
pub fn raw_row<'a, I>(pairs: I) -> RawRow
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .filter_map(|(name, value)| Column::parse(name).map(|c| (c, value.to_string())))
        .collect()
}
