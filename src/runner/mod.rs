//! Provisioning run orchestration.

pub mod workflow;

pub use workflow::{
    exit_codes, HostContext, ProvisionSettings, Provisioner, RunReport, RunStatus,
};
