//! Client record types and their enumerated cell domains.
//!
//! Every enumerated field has two accepted spellings: the label written to
//! the store file (kept compatible with existing `clients.csv` files) and a
//! snake_case token used by the JSON API. Decoding accepts either; anything
//! else falls back to the domain default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell domains
// ---------------------------------------------------------------------------

/// An enumerated cell domain with a default for out-of-domain input.
pub trait CellValue: Copy + Default + PartialEq + 'static {
    /// Every value in the domain, in display order.
    const VALUES: &'static [Self];

    /// The label stored in the table file.
    fn label(&self) -> &'static str;

    /// The snake_case token used by the JSON API.
    fn token(&self) -> &'static str;

    /// Decode a raw cell, returning `None` when it is outside the domain.
    fn decode(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::VALUES
            .iter()
            .copied()
            .find(|v| v.label() == raw || v.token() == raw)
    }

    /// Decode a raw cell, coercing out-of-domain input to the default.
    fn decode_or_default(raw: &str) -> Self {
        Self::decode(raw).unwrap_or_default()
    }
}

/// Whether the client is onboarding for the first time or already retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    #[default]
    New,
    Ongoing,
}

/// Ongoing clients skip the two proposal steps.
const ONGOING_STEPS: [ProcessStep; 6] = [
    ProcessStep::CoiForm,
    ProcessStep::CaForm,
    ProcessStep::WordContract,
    ProcessStep::ElForm,
    ProcessStep::SignedPdfContract,
    ProcessStep::SentToClient,
];

impl ClientType {
    /// The process steps that count towards progress for this client type.
    pub fn steps(&self) -> &'static [ProcessStep] {
        match self {
            Self::New => &ProcessStep::ALL,
            Self::Ongoing => &ONGOING_STEPS,
        }
    }
}

impl CellValue for ClientType {
    const VALUES: &'static [Self] = &[Self::New, Self::Ongoing];

    fn label(&self) -> &'static str {
        match self {
            Self::New => "جديد",
            Self::Ongoing => "مستمر",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Ongoing => "ongoing",
        }
    }
}

/// Delivery state of the contracted service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl CellValue for ServiceStatus {
    const VALUES: &'static [Self] = &[Self::NotStarted, Self::InProgress, Self::Completed];

    fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "لم تبدأ",
            Self::InProgress => "قيد التنفيذ",
            Self::Completed => "مكتملة",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Binary completion state shared by process steps and invoices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    Done,
    #[default]
    NotDone,
}

impl Completion {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl CellValue for Completion {
    const VALUES: &'static [Self] = &[Self::Done, Self::NotDone];

    fn label(&self) -> &'static str {
        match self {
            Self::Done => "تم",
            Self::NotDone => "لم يتم",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::NotDone => "not_done",
        }
    }
}

// ---------------------------------------------------------------------------
// Process steps
// ---------------------------------------------------------------------------

/// An onboarding milestone with a binary completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStep {
    TechnicalProposal,
    FinancialProposal,
    CoiForm,
    CaForm,
    WordContract,
    ElForm,
    SignedPdfContract,
    SentToClient,
}

impl ProcessStep {
    /// All steps in table order. New clients track every one of them.
    pub const ALL: [ProcessStep; 8] = [
        Self::TechnicalProposal,
        Self::FinancialProposal,
        Self::CoiForm,
        Self::CaForm,
        Self::WordContract,
        Self::ElForm,
        Self::SignedPdfContract,
        Self::SentToClient,
    ];

    /// Column header in the table file.
    pub fn header(&self) -> &'static str {
        match self {
            Self::TechnicalProposal => "العرض الفني",
            Self::FinancialProposal => "العرض المالي",
            Self::CoiForm => "COI Form",
            Self::CaForm => "CA Form",
            Self::WordContract => "عقد وورد",
            Self::ElForm => "EL Form",
            Self::SignedPdfContract => "عقد PDF (توقيع المدير)",
            Self::SentToClient => "إرسال للعميل",
        }
    }

    /// Field key in the JSON API.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TechnicalProposal => "technical_proposal",
            Self::FinancialProposal => "financial_proposal",
            Self::CoiForm => "coi_form",
            Self::CaForm => "ca_form",
            Self::WordContract => "word_contract",
            Self::ElForm => "el_form",
            Self::SignedPdfContract => "signed_pdf_contract",
            Self::SentToClient => "sent_to_client",
        }
    }

    /// Whether the step only applies to the new-client flow.
    pub fn new_client_only(&self) -> bool {
        !ClientType::Ongoing.steps().contains(self)
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One client row, keyed by `client_name`.
///
/// All eight step columns are carried for every client so that switching a
/// client between new and ongoing never loses data; which of them count is
/// decided by [`ClientType::steps`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_name: String,
    pub client_type: ClientType,
    pub process_steps: BTreeMap<ProcessStep, Completion>,
    pub service_status: ServiceStatus,
    pub invoice_1: Completion,
    pub invoice_2: Completion,
    pub notes: String,
}

impl ClientRecord {
    /// A record with every step and invoice not done and the service not started.
    pub fn new(client_name: impl Into<String>, client_type: ClientType) -> Self {
        Self {
            client_name: client_name.into(),
            client_type,
            process_steps: ProcessStep::ALL
                .iter()
                .map(|step| (*step, Completion::NotDone))
                .collect(),
            service_status: ServiceStatus::NotStarted,
            invoice_1: Completion::NotDone,
            invoice_2: Completion::NotDone,
            notes: String::new(),
        }
    }

    /// Completion of a step; absent steps read as not done.
    pub fn step(&self, step: ProcessStep) -> Completion {
        self.process_steps.get(&step).copied().unwrap_or_default()
    }

    pub fn set_step(&mut self, step: ProcessStep, completion: Completion) {
        self.process_steps.insert(step, completion);
    }

    /// Builder-style variant of [`ClientRecord::set_step`].
    pub fn with_step(mut self, step: ProcessStep, completion: Completion) -> Self {
        self.set_step(step, completion);
        self
    }

    /// Mark each of `steps` as done.
    pub fn with_steps_done(mut self, steps: &[ProcessStep]) -> Self {
        for step in steps {
            self.set_step(*step, Completion::Done);
        }
        self
    }

    pub fn with_service_status(mut self, status: ServiceStatus) -> Self {
        self.service_status = status;
        self
    }

    /// The record together with its derived progress, as shown to users.
    pub fn view(&self) -> ClientView {
        ClientView {
            record: self.clone(),
            progress_percent: crate::progress::progress(self),
        }
    }
}

/// A record plus its derived progress percentage.
///
/// `progress_percent` is computed from the record on construction and is
/// never read back from input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientView {
    #[serde(flatten)]
    pub record: ClientRecord,
    pub progress_percent: u8,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
