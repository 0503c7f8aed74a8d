//! First-run template written when no store file exists yet.

use crate::client::{ClientRecord, ClientType, Completion, ProcessStep, ServiceStatus};

const TEMPLATE_NOTE: &str = "—";

/// Three sample clients covering both client types and partial progress.
pub fn template_records() -> Vec<ClientRecord> {
    let mut abc = ClientRecord::new("شركة ABC", ClientType::New)
        .with_steps_done(&ProcessStep::ALL)
        .with_service_status(ServiceStatus::InProgress);
    abc.invoice_1 = Completion::Done;

    let xyz = ClientRecord::new("شركة XYZ", ClientType::Ongoing).with_steps_done(&[
        ProcessStep::CoiForm,
        ProcessStep::CaForm,
        ProcessStep::WordContract,
        ProcessStep::ElForm,
    ]);

    let def = ClientRecord::new("شركة DEF", ClientType::New).with_steps_done(&[
        ProcessStep::TechnicalProposal,
        ProcessStep::FinancialProposal,
        ProcessStep::CoiForm,
        ProcessStep::CaForm,
        ProcessStep::WordContract,
    ]);

    [abc, xyz, def]
        .into_iter()
        .map(|mut r| {
            r.notes = TEMPLATE_NOTE.to_string();
            r
        })
        .collect()
}
