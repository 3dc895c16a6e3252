mod arguments;
mod access_gate;
mod response;

pub use arguments::{Arguments, Subject};
pub use access_gate::{Gate, GateExt, MapGateError};
pub use response::GateResponse;
