//! coredns-probe application layer: ports, the target registry and the
//! probe/summary/discovery use cases.
pub mod ports;
pub mod services;
pub mod use_cases;
