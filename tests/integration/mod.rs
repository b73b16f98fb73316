//! Integration tests for the ezbx deploy/route orchestrator

mod cli_arguments;
mod route_workflow;
mod test_utils;
