mod event_queue_tests;
mod store_tests;
