/// Middleware modules for the API server
///
/// - `cors`: Wildcard CORS headers on every response

pub mod cors;
