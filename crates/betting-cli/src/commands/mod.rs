pub(crate) mod common;
pub(crate) mod deploy;
pub(crate) mod enter;
pub(crate) mod export;
pub(crate) mod fund;
pub(crate) mod networks;
pub(crate) mod status;

pub(crate) use common::Context;
pub(crate) use deploy::DeployArgs;
pub(crate) use enter::EnterArgs;
pub(crate) use fund::{FundCheckArgs, FundLinkArgs};
