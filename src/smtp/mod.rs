//! Mail-transport probe: a minimal SMTP dialogue against the candidate's
//! mail host, observing whether the recipient is accepted.

mod connector;
mod error;
mod probe;
mod session;

pub use connector::{Connector, TcpConnector};
pub use error::{SmtpProbeError, SmtpStage};
pub use probe::SmtpProbe;
pub use session::SmtpSession;
