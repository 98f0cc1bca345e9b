//! Interface layer: transports exposing the application

pub mod http;
