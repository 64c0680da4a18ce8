mod capture_subscription;
mod config_loading;
mod coordinator_flow;
mod seal_resolution;
