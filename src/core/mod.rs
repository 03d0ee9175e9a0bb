pub mod arrivals;
pub mod checkout_line;
pub mod customer;
pub mod errors;
pub mod event;
pub mod event_queue;
pub mod execution;
pub mod statistics;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
