/// Body of the root health check, kept as a literal for load balancer probes.
pub const HEALTH_TEXT: &str = "Ok";
