//! State-owning services. All mutation funnels through their public
//! operations; views hold a reference and never touch fields directly.

pub mod directory;
pub mod session;
