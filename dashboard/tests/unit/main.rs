//! Integration tests

mod test_http_source;
mod test_poller;
mod test_scenario;
mod test_server;
