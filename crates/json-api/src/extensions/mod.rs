//! Extension traits

mod depot;
mod response;
mod session;

pub(crate) use depot::DepotExt as _;
pub(crate) use response::CreatedExt as _;
pub(crate) use session::SessionExt as _;
