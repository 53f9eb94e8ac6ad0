pub mod classification_endpoint;
pub mod classification_model;
pub mod client;
pub mod transport;
pub mod watch;
