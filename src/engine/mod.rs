pub mod deliveries;
pub mod drivers;
pub mod notifications;
