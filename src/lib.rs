#![deny(unsafe_code, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Resource authorization built on top of [tower](https://docs.rs/tower/latest/tower/).
//!
//! Checks are forwarded to an injected [`Gate`](gate::Gate). Resource controllers get one `can:<ability>,<subject>`
//! middleware per ability, computed by [`ResourceBindingBuilder`](middleware::ResourceBindingBuilder).

pub mod ability;
pub mod authorize;
pub mod caller;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod resource;
