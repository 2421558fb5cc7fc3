//! Scoring gateway implementations.

mod http_gateway;

pub use http_gateway::HttpScoringGateway;
