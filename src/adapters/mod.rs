pub mod console_notifier;
pub mod container_client;
pub mod error;
pub mod provisioner;
